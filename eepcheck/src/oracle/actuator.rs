// eepcheck/src/oracle/actuator.rs
//! Actuator checks: values are written through the device management
//! system and the telegram it transmits through the gateway is inspected.

use log::{debug, info};

use crate::constants::{LEARN_BIT_MASK, RORG_4BS};
use crate::eep::A53802_STATUS;
use crate::oracle::{Oracle, ProfileReport, ProfileState};
use crate::protocol::{Erp1Telegram, Packet};
use crate::types::{DeviceId, EepId, Value};
use crate::{Error, Result};

/// Offset from the gateway base ID assigned to the actuator under test
pub const PAIRING_OFFSET: u8 = 2;

// learn bit plus the switching bit
const DB0_ON: u8 = LEARN_BIT_MASK | 0x01;
const DB0_OFF: u8 = LEARN_BIT_MASK;

/// Supported actuator profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuator {
    /// A5-38-01 switching
    Switch,
    /// A5-38-02 dimming
    Dimmer,
}

impl Actuator {
    pub const ALL: [Actuator; 2] = [Actuator::Switch, Actuator::Dimmer];

    pub fn eep(&self) -> EepId {
        match self {
            Actuator::Switch => EepId::new(RORG_4BS, 0x38, 0x01),
            Actuator::Dimmer => EepId::new(RORG_4BS, 0x38, 0x02),
        }
    }
}

/// Expected command bytes of one transmitted telegram; `None` is not
/// checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Expect {
    db2: Option<u8>,
    db1: Option<u8>,
    db0: u8,
}

impl Expect {
    fn matches(&self, packet: &Packet) -> bool {
        let Ok(telegram) = Erp1Telegram::from_packet(packet) else {
            return false;
        };
        let Some([_, db2, db1, db0]) = telegram.four_bs_payload() else {
            return false;
        };
        telegram.sender.base_offset() == PAIRING_OFFSET
            && db0 == self.db0
            && self.db2.is_none_or(|v| v == db2)
            && self.db1.is_none_or(|v| v == db1)
    }
}

/// Dimming level written for ramp value `i` and the DB2 byte it must
/// produce.
pub fn dimmer_step(i: u8) -> (i64, u8) {
    let level = (i as f64 / 2.55).round();
    (level as i64, (level * 2.55).round() as u8)
}

impl Oracle<'_> {
    pub fn run_actuator(&mut self, actuator: Actuator) -> Result<ProfileReport> {
        let eep = actuator.eep();
        info!("testing actuator {:?} ({})", actuator, eep);
        let report = self.with_device(eep, |oracle, id, run| {
            run.advance(ProfileState::Priming);
            oracle
                .manager
                .set_value(id, 1, "PAIRING", Value::Integer(PAIRING_OFFSET as i64))?;
            if actuator == Actuator::Dimmer {
                oracle.prime(&A53802_STATUS, id)?;
            }
            let drain = oracle.config.drain_duration();
            oracle
                .gateway
                .drain(drain, oracle.config.byte_timeout_ms)?;

            run.advance(ProfileState::Sweeping);
            match actuator {
                Actuator::Switch => oracle.check_switch(eep, id),
                Actuator::Dimmer => oracle.check_dimmer(eep, id),
            }
        })?;
        info!("{} passed: {} telegrams", report.eep, report.codes_checked);
        Ok(report)
    }

    fn check_switch(&mut self, eep: EepId, id: DeviceId) -> Result<ProfileReport> {
        let mut report = ProfileReport::new(eep);
        for state in [true, false, true] {
            self.manager.set_value(id, 1, "STATE", Value::Bool(state))?;
            let expect = Expect {
                db2: None,
                db1: None,
                db0: if state { DB0_ON } else { DB0_OFF },
            };
            self.await_command(eep, &format!("STATE {}", state), expect)?;
            report.codes_checked += 1;
        }
        Ok(report)
    }

    fn check_dimmer(&mut self, eep: EepId, id: DeviceId) -> Result<ProfileReport> {
        let mut report = ProfileReport::new(eep);

        self.manager.set_value(id, 1, "LEVEL", Value::Integer(0))?;
        let off = Expect {
            db2: None,
            db1: None,
            db0: DB0_OFF,
        };
        self.await_command(eep, "LEVEL 0", off)?;
        report.codes_checked += 1;

        for i in 2..=255u8 {
            let (level, db2) = dimmer_step(i);
            self.manager
                .set_value(id, 1, "RAMPING_TIME", Value::Integer(i as i64))?;
            self.manager.set_value(id, 1, "LEVEL", Value::Integer(level))?;
            let expect = Expect {
                db2: Some(db2),
                db1: Some(i),
                db0: DB0_ON,
            };
            self.await_command(eep, &format!("LEVEL {} ramp {}", level, i), expect)?;
            report.codes_checked += 1;
        }
        Ok(report)
    }

    fn await_command(&mut self, eep: EepId, step: &str, expect: Expect) -> Result<()> {
        let deadline = self.config.read_deadline();
        let byte_timeout = self.config.byte_timeout_ms;
        match self
            .gateway
            .await_packet(deadline, byte_timeout, |p| expect.matches(p))?
        {
            Some(_) => {
                debug!("{} {}: telegram ok", eep, step);
                Ok(())
            }
            None => Err(Error::NoTelegram {
                eep,
                step: step.to_string(),
            }),
        }
    }
}
