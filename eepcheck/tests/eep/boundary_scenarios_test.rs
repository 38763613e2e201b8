#[path = "../common/mod.rs"]
mod common;

use eepcheck::eep::{Decoded, EepCodec, Reading, find};
use eepcheck::{EepId, Error};

fn eep(s: &str) -> EepId {
    s.parse().unwrap()
}

fn value(readings: &[Reading], field: &str) -> f64 {
    readings
        .iter()
        .find(|r| r.field == field)
        .map(|r| r.value)
        .unwrap_or_else(|| panic!("no reading for {}", field))
}

#[test]
fn a50603_sweep_endpoints() {
    let profile = find(eep("A50603")).unwrap();
    let codec = EepCodec::new(profile);
    let sweep = &profile.sweeps[0];

    let zero = codec.decode_values(&codec.sweep_payload(sweep, 0).unwrap()).unwrap();
    assert_eq!(value(&zero, "ILLUMINATION"), 0.0);
    assert_eq!(value(&zero, "SUPPLY_VOLTAGE"), 0.0);

    let top = codec.decode_values(&codec.sweep_payload(sweep, 1000).unwrap()).unwrap();
    assert_eq!(value(&top, "ILLUMINATION"), 1000.0);
    let voltage = top.iter().find(|r| r.field == "SUPPLY_VOLTAGE").unwrap();
    assert_eq!(voltage.code, 250);
    assert!((voltage.value - 5.0).abs() < 1e-9);
}

#[test]
fn a50603_divide_truncates() {
    let profile = find(eep("A50603")).unwrap();
    let codec = EepCodec::new(profile);
    let readings = codec
        .decode_values(&codec.sweep_payload(&profile.sweeps[0], 999).unwrap())
        .unwrap();
    let voltage = readings.iter().find(|r| r.field == "SUPPLY_VOLTAGE").unwrap();
    assert_eq!(voltage.code, 249);
}

#[test]
fn a50501_teach_in_and_baseline() {
    let codec = EepCodec::new(find(eep("A50501")).unwrap());
    assert_eq!(
        codec.decode(&[0x03, 0xFF, 0x00, 0x00]).unwrap(),
        Decoded::TeachIn
    );
    let readings = codec.decode_values(&[0x00, 0x00, 0x00, 0x08]).unwrap();
    assert_eq!(value(&readings, "PRESSURE"), 500.0);
}

#[test]
fn a50401_sentinel_gives_full_humidity_and_fallback_temperature() {
    let codec = EepCodec::new(find(eep("A50401")).unwrap());
    let readings = codec.decode_values(&[0x00, 0xFA, 0xFA, 0x08]).unwrap();
    assert_eq!(value(&readings, "HUMIDITY"), 100.0);
    assert_eq!(value(&readings, "TEMPERATURE"), 0.0);
    let temperature = readings.iter().find(|r| r.field == "TEMPERATURE").unwrap();
    assert!(!temperature.available);
}

#[test]
fn a50402_fallback_is_range_minimum() {
    let codec = EepCodec::new(find(eep("A50402")).unwrap());
    let readings = codec.decode_values(&[0x00, 0xFA, 0xFA, 0x08]).unwrap();
    assert_eq!(value(&readings, "TEMPERATURE"), -20.0);
}

#[test]
fn encode_values_round_trips_through_decode() {
    let codec = EepCodec::new(find(eep("A50401")).unwrap());
    let payload = codec
        .encode_values(&[("HUMIDITY", 50.0), ("TEMPERATURE", 20.0)])
        .unwrap();
    let readings = codec.decode_values(&payload).unwrap();
    assert!((value(&readings, "HUMIDITY") - 50.0).abs() < 1e-9);
    assert!((value(&readings, "TEMPERATURE") - 20.0).abs() < 1e-9);
}

#[test]
fn out_of_domain_target_is_rejected() {
    let codec = EepCodec::new(find(eep("A50501")).unwrap());
    assert!(matches!(
        codec.encode_values(&[("PRESSURE", 1200.0)]),
        Err(Error::OutOfDomain { .. })
    ));
}

#[test]
fn wrong_length_is_malformed() {
    let codec = EepCodec::new(find(eep("A50501")).unwrap());
    assert!(matches!(
        codec.decode(&[0x00, 0x00, 0x08]),
        Err(Error::MalformedPayload {
            expected: 4,
            actual: 3
        })
    ));
}
