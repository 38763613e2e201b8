#[path = "../common/mod.rs"]
mod common;

use eepcheck::oracle::actuator::PAIRING_OFFSET;
use eepcheck::protocol::{Erp1Telegram, Packet};
use eepcheck::test_support::SimulatedGateway;
use eepcheck::{Actuator, Error, Oracle};

#[test]
fn actuators_pass_and_are_removed() {
    let sim = SimulatedGateway::new();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    for actuator in Actuator::ALL {
        oracle.run_actuator(actuator).unwrap();
    }
    assert_eq!(sim.deleted().len(), 2);
    assert_eq!(sim.live_devices(), 0);
}

#[test]
fn dimmer_primes_status_before_commands() {
    let sim = SimulatedGateway::new();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());
    oracle.run_actuator(Actuator::Dimmer).unwrap();

    let sent: Vec<[u8; 4]> = sim
        .sent()
        .iter()
        .filter_map(|f| Packet::decode(f).ok())
        .filter_map(|p| Erp1Telegram::from_packet(&p).ok())
        .filter_map(|t| t.four_bs_payload())
        .collect();
    assert_eq!(&sent[..3], &[[0x02, 0x00, 0x00, 0x08]; 3]);
    assert_eq!(&sent[3..], &[[0x02, 0xFF, 0x00, 0x01]; 3]);
}

#[test]
fn silent_actuator_reports_missing_telegram() {
    let sim = SimulatedGateway::new();
    sim.mute_actuators();
    let mut gw = sim.bound_gateway("if0");
    let mut manager = sim.clone();
    let mut oracle = Oracle::new(&mut gw, &mut manager, common::fast_config());

    match oracle.run_actuator(Actuator::Dimmer) {
        Err(Error::NoTelegram { eep, step }) => {
            assert_eq!(eep, Actuator::Dimmer.eep());
            assert_eq!(step, "LEVEL 0");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(sim.live_devices(), 0);
}

#[test]
fn pairing_offset_is_two() {
    assert_eq!(PAIRING_OFFSET, 2);
}
