#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use eepcheck::test_support::SimulatedGateway;
use eepcheck::transport::MockTransport;
use eepcheck::{Error, Gateway};

#[test]
fn session_address_comes_from_the_gateway() {
    let sim = SimulatedGateway::with_address(common::fixtures::gateway_address());
    let gw = Gateway::new(Box::new(sim.clone()))
        .establish("enocean0", Duration::from_millis(100), 1)
        .unwrap();
    assert_eq!(gw.address(), common::fixtures::gateway_address());
    assert_eq!(gw.session().interface(), "enocean0");
    assert_eq!(sim.sent()[0], common::fixtures::read_id_base_frame());
}

#[test]
fn session_from_fixture_response() {
    let mut mock = MockTransport::new();
    mock.push_bytes(&common::fixtures::four_bs_frame());
    mock.push_bytes(&common::fixtures::id_base_response_frame());
    let gw = Gateway::new(Box::new(mock))
        .establish("enocean0", Duration::from_millis(100), 1)
        .unwrap();
    assert_eq!(gw.address().to_string(), "FF801280");
}

#[test]
fn injected_telegram_uses_session_address() {
    let sim = SimulatedGateway::new();
    let mut gw = sim.bound_gateway("if0");
    gw.send_payload(&[0x00, 0xFA, 0xFA, 0x08]).unwrap();
    assert_eq!(sim.sent()[0], common::fixtures::four_bs_frame());
}

#[test]
fn unreachable_gateway_is_fatal() {
    let gw = Gateway::new(Box::new(MockTransport::new()));
    assert!(matches!(
        gw.establish("enocean0", Duration::from_millis(10), 1),
        Err(Error::AddressUnavailable)
    ));
}
