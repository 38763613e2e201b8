// eepcheck/src/eep/profiles.rs
//! Profile table of every sensor the harness knows how to exercise.

use crate::constants::RORG_4BS;
use crate::eep::field::{BitRange, Selector, ValueField};
use crate::eep::profile::{Derive, Drive, PrimingStep, Profile, Sweep};
use crate::types::EepId;
use crate::{Error, Result};

// DB0.1 ("data available" on temperature/humidity and light sensors)
const DB0_BIT1: BitRange = BitRange::bit(30);
// DB0.0 (range select / energy storage availability)
const DB0_BIT0: BitRange = BitRange::bit(31);

const TEMP_AVAILABLE: Selector = Selector::new(DB0_BIT1, 1);
const STORAGE_AVAILABLE: Selector = Selector::new(DB0_BIT0, 1);
const RANGE_LOW: Selector = Selector::new(DB0_BIT0, 0);
const RANGE_HIGH: Selector = Selector::new(DB0_BIT0, 1);

const fn eep(func: u8, kind: u8) -> EepId {
    EepId::new(RORG_4BS, func, kind)
}

/// Single falling temperature field, baseline data telegram then a
/// teach-in full of garbage.
macro_rules! a502 {
    ($name:ident, $kind:literal, $bits:expr, $top:literal, $min:literal, $max:literal) => {
        const $name: Profile = Profile {
            eep: eep(0x02, $kind),
            description: "temperature sensor",
            fields: &[ValueField::linear("TEMPERATURE", $bits, (0, $top), ($min, $max), "°C").falling()],
            priming: &[PrimingStep {
                label: "learn bit",
                telegrams: &[[0x00, 0x00, 0x00, 0x08], [0x00, 0x00, 0xFF, 0x00]],
                expect: &[("TEMPERATURE", $max)],
            }],
            sweeps: &[Sweep {
                label: "temperature",
                top: $top,
                drives: &[Drive::identity("TEMPERATURE")],
                flags: &[],
            }],
        };
    };
    ($name:ident, $kind:literal, $min:literal, $max:literal) => {
        a502!($name, $kind, BitRange::db(1), 255, $min, $max);
    };
}

a502!(A50201, 0x01, -40.0, 0.0);
a502!(A50202, 0x02, -30.0, 10.0);
a502!(A50203, 0x03, -20.0, 20.0);
a502!(A50204, 0x04, -10.0, 30.0);
a502!(A50205, 0x05, 0.0, 40.0);
a502!(A50206, 0x06, 10.0, 50.0);
a502!(A50207, 0x07, 20.0, 60.0);
a502!(A50208, 0x08, 30.0, 70.0);
a502!(A50209, 0x09, 40.0, 80.0);
a502!(A5020A, 0x0A, 50.0, 90.0);
a502!(A5020B, 0x0B, 60.0, 100.0);
a502!(A50210, 0x10, -60.0, 20.0);
a502!(A50211, 0x11, -50.0, 30.0);
a502!(A50212, 0x12, -40.0, 40.0);
a502!(A50213, 0x13, -30.0, 50.0);
a502!(A50214, 0x14, -20.0, 60.0);
a502!(A50215, 0x15, -10.0, 70.0);
a502!(A50216, 0x16, 0.0, 80.0);
a502!(A50217, 0x17, 10.0, 90.0);
a502!(A50218, 0x18, 20.0, 100.0);
a502!(A50219, 0x19, 30.0, 110.0);
a502!(A5021A, 0x1A, 40.0, 120.0);
a502!(A5021B, 0x1B, 50.0, 130.0);
a502!(A50220, 0x20, BitRange::new(14, 10), 1023, -10.0, 41.2);
a502!(A50230, 0x30, BitRange::new(14, 10), 1023, -40.0, 62.3);

const HUMIDITY_DB2: ValueField =
    ValueField::linear("HUMIDITY", BitRange::db(2), (0, 250), (0.0, 100.0), "%");

const A50401: Profile = Profile {
    eep: eep(0x04, 0x01),
    description: "temperature and humidity sensor, 0..40 °C",
    fields: &[
        HUMIDITY_DB2,
        ValueField::linear("TEMPERATURE", BitRange::db(1), (0, 250), (0.0, 40.0), "°C")
            .gated(TEMP_AVAILABLE, 0.0),
    ],
    priming: &[
        PrimingStep {
            label: "learn bit",
            telegrams: &[[0x00, 0x00, 0x00, 0x0A], [0x00, 0xFF, 0xFF, 0x00]],
            expect: &[("TEMPERATURE", 0.0), ("HUMIDITY", 0.0)],
        },
        PrimingStep {
            label: "temperature availability",
            telegrams: &[[0x00, 0x00, 0x00, 0x0A], [0x00, 0xFA, 0xFA, 0x08]],
            expect: &[("TEMPERATURE", 0.0), ("HUMIDITY", 100.0)],
        },
    ],
    sweeps: &[Sweep {
        label: "humidity and temperature",
        top: 250,
        drives: &[Drive::identity("HUMIDITY"), Drive::identity("TEMPERATURE")],
        flags: &[TEMP_AVAILABLE],
    }],
};

const A50402: Profile = Profile {
    eep: eep(0x04, 0x02),
    description: "temperature and humidity sensor, -20..60 °C",
    fields: &[
        HUMIDITY_DB2,
        ValueField::linear("TEMPERATURE", BitRange::db(1), (0, 250), (-20.0, 60.0), "°C")
            .gated(TEMP_AVAILABLE, -20.0),
    ],
    priming: &[
        PrimingStep {
            label: "learn bit",
            telegrams: &[[0x00, 0x00, 0x00, 0x0A], [0x00, 0xFA, 0xFA, 0x00]],
            expect: &[("TEMPERATURE", -20.0), ("HUMIDITY", 0.0)],
        },
        PrimingStep {
            label: "temperature availability",
            telegrams: &[[0x00, 0x00, 0x00, 0x0A], [0x00, 0xFA, 0xFA, 0x08]],
            expect: &[("TEMPERATURE", -20.0), ("HUMIDITY", 100.0)],
        },
    ],
    sweeps: &[Sweep {
        label: "humidity and temperature",
        top: 250,
        drives: &[Drive::identity("HUMIDITY"), Drive::identity("TEMPERATURE")],
        flags: &[TEMP_AVAILABLE],
    }],
};

const A50403: Profile = Profile {
    eep: eep(0x04, 0x03),
    description: "temperature and humidity sensor, 10 bit temperature",
    fields: &[
        ValueField::linear("HUMIDITY", BitRange::db(3), (0, 255), (0.0, 100.0), "%"),
        ValueField::linear("TEMPERATURE", BitRange::new(14, 10), (0, 1023), (-20.0, 60.0), "°C"),
    ],
    priming: &[PrimingStep {
        label: "learn bit",
        telegrams: &[[0x00, 0x00, 0x00, 0x0A], [0xFF, 0x03, 0xFF, 0x00]],
        expect: &[("TEMPERATURE", -20.0), ("HUMIDITY", 0.0)],
    }],
    sweeps: &[Sweep {
        label: "humidity and temperature",
        top: 1023,
        drives: &[
            Drive::derived("HUMIDITY", Derive::Divide(4)),
            Drive::identity("TEMPERATURE"),
        ],
        flags: &[TEMP_AVAILABLE],
    }],
};

const A50501: Profile = Profile {
    eep: eep(0x05, 0x01),
    description: "barometric sensor",
    fields: &[ValueField::linear("PRESSURE", BitRange::new(6, 10), (0, 1023), (500.0, 1150.0), "hPa")],
    priming: &[PrimingStep {
        label: "learn bit",
        telegrams: &[[0x00, 0x00, 0x00, 0x08], [0x03, 0xFF, 0x00, 0x00]],
        expect: &[("PRESSURE", 500.0)],
    }],
    sweeps: &[Sweep {
        label: "pressure",
        top: 1023,
        drives: &[Drive::identity("PRESSURE")],
        flags: &[],
    }],
};

const SUPPLY_VOLTAGE: ValueField =
    ValueField::linear("SUPPLY_VOLTAGE", BitRange::db(3), (0, 255), (0.0, 5.1), "V");

const RANGE_SWEEPS: &[Sweep] = &[
    Sweep {
        label: "range select 0",
        top: 255,
        drives: &[
            Drive::identity("SUPPLY_VOLTAGE"),
            Drive::identity("ILLUMINATION_2"),
            Drive::identity("ILLUMINATION_1"),
        ],
        flags: &[RANGE_LOW],
    },
    Sweep {
        label: "range select 1",
        top: 255,
        drives: &[
            Drive::identity("SUPPLY_VOLTAGE"),
            Drive::identity("ILLUMINATION_2"),
            Drive::identity("ILLUMINATION_1"),
        ],
        flags: &[RANGE_HIGH],
    },
];

/// Light sensor with two illumination ranges selected by DB0.0
macro_rules! a506_ranged {
    ($name:ident, $kind:literal, ($ill2_min:literal, $ill2_max:literal), ($ill1_min:literal, $ill1_max:literal)) => {
        const $name: Profile = Profile {
            eep: eep(0x06, $kind),
            description: "light sensor, two ranges",
            fields: &[
                SUPPLY_VOLTAGE,
                ValueField::linear("ILLUMINATION_2", BitRange::db(2), (0, 255), ($ill2_min, $ill2_max), "lx")
                    .gated(RANGE_HIGH, $ill2_min),
                ValueField::linear("ILLUMINATION_1", BitRange::db(1), (0, 255), ($ill1_min, $ill1_max), "lx")
                    .gated(RANGE_LOW, $ill1_min),
            ],
            priming: &[PrimingStep {
                label: "learn bit",
                telegrams: &[[0x00, 0x00, 0x00, 0x08], [0xFF, 0xFF, 0xFF, 0x00]],
                expect: &[
                    ("SUPPLY_VOLTAGE", 0.0),
                    ("ILLUMINATION_1", $ill1_min),
                    ("ILLUMINATION_2", $ill2_min),
                ],
            }],
            sweeps: RANGE_SWEEPS,
        };
    };
}

a506_ranged!(A50601, 0x01, (300.0, 30000.0), (600.0, 60000.0));
a506_ranged!(A50602, 0x02, (0.0, 510.0), (0.0, 1020.0));
a506_ranged!(A50605, 0x05, (0.0, 5100.0), (0.0, 10200.0));

const A50603: Profile = Profile {
    eep: eep(0x06, 0x03),
    description: "light sensor, 0..1000 lx",
    fields: &[
        SUPPLY_VOLTAGE,
        ValueField::linear("ILLUMINATION", BitRange::new(8, 10), (0, 1000), (0.0, 1000.0), "lx"),
    ],
    priming: &[PrimingStep {
        label: "learn bit",
        telegrams: &[[0x00, 0x00, 0x00, 0x08], [0xFF, 0xFF, 0xC0, 0x00]],
        expect: &[("SUPPLY_VOLTAGE", 0.0), ("ILLUMINATION", 0.0)],
    }],
    sweeps: &[Sweep {
        label: "voltage and illumination",
        top: 1000,
        drives: &[
            Drive::derived("SUPPLY_VOLTAGE", Derive::Divide(4)),
            Drive::identity("ILLUMINATION"),
        ],
        flags: &[],
    }],
};

const A50604: Profile = Profile {
    eep: eep(0x06, 0x04),
    description: "light sensor with temperature and energy storage",
    fields: &[
        ValueField::linear("TEMPERATURE", BitRange::db(3), (0, 255), (-20.0, 61.6), "°C")
            .gated(TEMP_AVAILABLE, -20.0),
        ValueField::linear("ILLUMINATION", BitRange::new(8, 16), (0, 65535), (0.0, 65535.0), "lx"),
        ValueField::linear("ENERGY_STORAGE", BitRange::new(24, 4), (0, 15), (0.0, 100.0), "%")
            .gated(STORAGE_AVAILABLE, 0.0),
    ],
    priming: &[PrimingStep {
        label: "learn bit",
        telegrams: &[[0x00, 0x00, 0x00, 0x0B], [0xFF, 0xFF, 0xFF, 0xF3]],
        expect: &[("TEMPERATURE", -20.0), ("ILLUMINATION", 0.0), ("ENERGY_STORAGE", 0.0)],
    }],
    sweeps: &[Sweep {
        label: "temperature, illumination and storage",
        top: 1023,
        drives: &[
            Drive::derived("TEMPERATURE", Derive::Divide(4)),
            Drive::derived("ILLUMINATION", Derive::Rescale { from: 1023, to: 65535 }),
            Drive::derived("ENERGY_STORAGE", Derive::Modulo(16)),
        ],
        flags: &[TEMP_AVAILABLE, STORAGE_AVAILABLE],
    }],
};

/// Status telegrams of a dimming actuator (A5-38-08 command 2) as seen by
/// the device management system. Only the priming step is used.
pub const A53802_STATUS: Profile = Profile {
    eep: eep(0x38, 0x02),
    description: "dimmer",
    fields: &[ValueField::linear("LEVEL", BitRange::db(2), (0, 255), (0.0, 100.0), "%")],
    priming: &[PrimingStep {
        label: "learn bit",
        telegrams: &[[0x02, 0x00, 0x00, 0x08], [0x02, 0xFF, 0x00, 0x01]],
        expect: &[("LEVEL", 0.0)],
    }],
    sweeps: &[],
};

/// Sensor profiles in run order.
pub static PROFILES: &[Profile] = &[
    A50201, A50202, A50203, A50204, A50205, A50206, A50207, A50208, A50209, A5020A, A5020B,
    A50210, A50211, A50212, A50213, A50214, A50215, A50216, A50217, A50218, A50219, A5021A,
    A5021B, A50220, A50230, A50401, A50402, A50403, A50501, A50601, A50602, A50603, A50604,
    A50605,
];

/// Look up a sensor profile.
pub fn find(eep: EepId) -> Result<&'static Profile> {
    PROFILES
        .iter()
        .find(|p| p.eep == eep)
        .ok_or_else(|| Error::UnknownProfile(eep.to_string()))
}
