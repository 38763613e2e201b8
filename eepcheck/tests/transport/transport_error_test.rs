#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use eepcheck::protocol::reader::{await_packet, read_frame};
use eepcheck::session::Session;
use eepcheck::transport::{MockTransport, Transport};
use eepcheck::{Error, Gateway};

#[test]
fn read_error_is_fatal_not_a_timeout() {
    let mut mock = MockTransport::new();
    mock.push_bytes(&common::fixtures::four_bs_frame()[..8]);
    mock.push_error(std::io::ErrorKind::BrokenPipe);

    let err = read_frame(&mut mock, Duration::from_millis(100), 1).unwrap_err();
    assert!(!err.is_timeout());
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn timed_out_read_counts_as_nothing_yet() {
    let mut mock = MockTransport::new();
    mock.push_timeout();
    mock.push_bytes(&common::fixtures::id_base_response_frame());

    let found = await_packet(&mut mock, Duration::from_millis(100), 1, |_| true).unwrap();
    assert!(found.is_some());
}

#[test]
fn inter_byte_timeout_drops_the_partial_frame() {
    let mut mock = MockTransport::new();
    let frame = common::fixtures::four_bs_frame();
    mock.push_bytes(&frame[..12]);
    mock.push_timeout();
    mock.push_bytes(&frame);

    let got = read_frame(&mut mock, Duration::from_millis(100), 1).unwrap();
    assert_eq!(got, frame);
}

#[test]
fn send_failure_surfaces_from_the_gateway() {
    let mut mock = MockTransport::new();
    mock.set_send_failures(1);
    let mut gw =
        Gateway::new(Box::new(mock)).bind(Session::new(common::fixtures::gateway_address(), "if0"));

    assert!(matches!(
        gw.send_payload(&[0x00, 0x00, 0x00, 0x08]),
        Err(Error::Io(_))
    ));
    gw.send_payload(&[0x00, 0x00, 0x00, 0x08]).unwrap();
}

#[test]
fn shared_mock_records_resets() {
    let mock = MockTransport::new().shared();
    let mut handle = mock.clone();
    handle.reset().unwrap();
    assert_eq!(mock.borrow().resets, 1);
    assert_eq!(handle.describe(), "mock");
}
