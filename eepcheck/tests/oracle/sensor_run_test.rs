#[path = "../common/mod.rs"]
mod common;

use eepcheck::eep::{Profile, find};
use eepcheck::test_support::SimulatedGateway;
use eepcheck::{EepId, Error, Oracle, Value};

fn profile(id: &str) -> &'static Profile {
    find(id.parse::<EepId>().unwrap()).unwrap()
}

// A50501 raw code 512 (pressure bits straddle DB3/DB2)
const A50501_CODE_512: [u8; 4] = [0x02, 0x00, 0x00, 0x08];

#[test]
fn single_transient_mismatch_is_absorbed() {
    let sim = SimulatedGateway::new();
    sim.skew(A50501_CODE_512, "PRESSURE", 10, 1);
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    let report = oracle.run_profile(profile("A50501")).unwrap();
    assert_eq!(report.codes_checked, 1024);
    assert_eq!(report.retries, 1);
}

#[test]
fn four_retries_still_pass() {
    let sim = SimulatedGateway::new();
    sim.skew(A50501_CODE_512, "PRESSURE", 10, 4);
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    assert_eq!(oracle.run_profile(profile("A50501")).unwrap().retries, 4);
}

#[test]
fn five_consecutive_mismatches_halt_the_run() {
    let sim = SimulatedGateway::new();
    sim.skew(A50501_CODE_512, "PRESSURE", 10, 5);
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    let err = oracle
        .run_all(&[profile("A50501"), profile("A50401")])
        .unwrap_err();
    match err {
        Error::ValueMismatch {
            eep,
            code,
            mismatches,
        } => {
            assert_eq!(eep.to_string(), "A50501");
            assert_eq!(code, 512);
            assert_eq!(mismatches.len(), 1);
            assert_eq!(mismatches[0].field, "PRESSURE");
            assert_eq!(mismatches[0].expected_code, Some(512));
            assert_eq!(mismatches[0].actual_code, Some(522));
        }
        other => panic!("unexpected error: {}", other),
    }
    // the second profile never got a device
    assert_eq!(sim.deleted().len(), 1);
    assert_eq!(sim.live_devices(), 0);
}

#[test]
fn skew_within_tolerance_is_not_a_mismatch() {
    let sim = SimulatedGateway::new();
    sim.skew(A50501_CODE_512, "PRESSURE", 1, 10);
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    assert_eq!(oracle.run_profile(profile("A50501")).unwrap().retries, 0);
}

#[test]
fn zero_tolerance_catches_one_code_skew() {
    let sim = SimulatedGateway::new();
    sim.skew(A50501_CODE_512, "PRESSURE", 1, 10);
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let config = common::fast_config().with_code_tolerance(0);
    let mut oracle = Oracle::new(&mut gw, &mut manager, config);

    assert!(matches!(
        oracle.run_profile(profile("A50501")),
        Err(Error::ValueMismatch { code: 512, .. })
    ));
}

#[test]
fn wrong_priming_value_fails_before_sweep() {
    let sim = SimulatedGateway::new();
    sim.pin_value("PRESSURE", Value::Float(501.0));
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    let err = oracle.run_profile(profile("A50501")).unwrap_err();
    assert!(matches!(err, Error::PrimingFailed { .. }), "{}", err);
    assert_eq!(sim.live_devices(), 0);
    // two priming telegrams, three times each, nothing swept
    assert_eq!(sim.sent().len(), 6);
}

#[test]
fn non_numeric_value_is_a_proxy_error() {
    let sim = SimulatedGateway::new();
    sim.pin_value("PRESSURE", Value::Text("n/a".into()));
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    assert!(matches!(
        oracle.run_profile(profile("A50501")),
        Err(Error::Proxy(_))
    ));
    assert_eq!(sim.live_devices(), 0);
}

#[test]
fn cleanup_failure_keeps_the_original_error() {
    let sim = SimulatedGateway::new();
    sim.fail_deletes();
    sim.pin_value("PRESSURE", Value::Float(501.0));
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    assert!(matches!(
        oracle.run_profile(profile("A50501")),
        Err(Error::PrimingFailed { .. })
    ));
}

#[test]
fn delete_failure_after_pass_is_reported() {
    let sim = SimulatedGateway::new();
    sim.fail_deletes();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    assert!(matches!(
        oracle.run_profile(profile("A50501")),
        Err(Error::Proxy(_))
    ));
}

#[test]
fn range_select_profile_runs_both_sweeps() {
    let sim = SimulatedGateway::new();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    let report = oracle.run_profile(profile("A50601")).unwrap();
    assert_eq!(report.codes_checked, 512);
}

#[test]
fn full_table_passes_against_simulation() {
    let sim = SimulatedGateway::new();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    let profiles: Vec<&Profile> = eepcheck::eep::PROFILES.iter().collect();
    let reports = oracle.run_all(&profiles).unwrap();
    assert_eq!(reports.len(), profiles.len());
    assert!(reports.iter().all(|r| r.retries == 0));
    assert_eq!(sim.deleted().len(), profiles.len());
}
