#[path = "../common/mod.rs"]
mod common;

use eepcheck::eep::{EepCodec, PROFILES, Polarity, find};
use eepcheck::{EepId, Error};
use proptest::prelude::*;

#[test]
fn every_sensor_profile_is_listed() {
    for id in [
        "A50201", "A5020B", "A50210", "A5021B", "A50220", "A50230", "A50401", "A50402",
        "A50403", "A50501", "A50601", "A50602", "A50603", "A50604", "A50605",
    ] {
        let eep: EepId = id.parse().unwrap();
        assert_eq!(find(eep).unwrap().eep, eep);
    }
}

#[test]
fn unknown_profile_is_reported() {
    assert!(matches!(
        find("A53801".parse().unwrap()),
        Err(Error::UnknownProfile(_))
    ));
}

#[test]
fn every_priming_step_agrees_with_the_codec() {
    for profile in PROFILES {
        let codec = EepCodec::new(profile);
        for step in profile.priming {
            let baseline = step
                .telegrams
                .iter()
                .rev()
                .find(|t| !codec.is_teach_in(&t[..]).unwrap())
                .unwrap_or_else(|| panic!("{} {}: no data telegram", profile.eep, step.label));
            let readings = codec.decode_values(baseline).unwrap();
            for &(name, expected) in step.expect {
                let got = readings.iter().find(|r| r.field == name).unwrap().value;
                assert!(
                    (got - expected).abs() < 1e-9,
                    "{} {}: {} = {}, expected {}",
                    profile.eep,
                    step.label,
                    name,
                    got,
                    expected
                );
            }
        }
    }
}

#[test]
fn every_sweep_code_decodes() {
    for profile in PROFILES {
        let codec = EepCodec::new(profile);
        for sweep in profile.sweeps {
            for index in sweep.indices() {
                let payload = codec.sweep_payload(sweep, index).unwrap();
                assert!(!codec.is_teach_in(&payload).unwrap());
                codec.decode_values(&payload).unwrap();
            }
        }
    }
}

fn profile_index() -> impl Strategy<Value = usize> {
    0..PROFILES.len()
}

proptest! {
    #[test]
    fn physical_value_follows_polarity(idx in profile_index(), a in 0u32..=65535, b in 0u32..=65535) {
        for field in PROFILES[idx].fields {
            let lo = a.min(b).clamp(field.code_min, field.code_max);
            let hi = a.max(b).clamp(field.code_min, field.code_max);
            let (p_lo, p_hi) = (field.physical_of(lo).unwrap(), field.physical_of(hi).unwrap());
            match field.polarity {
                Polarity::Rising => prop_assert!(p_lo <= p_hi),
                Polarity::Falling => prop_assert!(p_lo >= p_hi),
            }
        }
    }

    #[test]
    fn nearest_code_inverts_physical(idx in profile_index(), raw in 0u32..=65535) {
        for field in PROFILES[idx].fields {
            let code = raw.clamp(field.code_min, field.code_max);
            let physical = field.physical_of(code).unwrap();
            prop_assert_eq!(field.nearest_code(physical), code as i64);
            prop_assert_eq!(field.code_of(physical).unwrap(), code);
        }
    }
}
