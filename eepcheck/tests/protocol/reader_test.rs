#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use eepcheck::protocol::reader::{await_packet, drain, read_frame};
use eepcheck::protocol::{Packet, PacketType};
use eepcheck::transport::MockTransport;

#[test]
fn reader_skips_noise_before_sync() {
    let mut mock = MockTransport::new();
    mock.push_bytes(&[0x00, 0x13, 0x37]);
    mock.push_bytes(&common::fixtures::four_bs_frame());

    let frame = read_frame(&mut mock, Duration::from_millis(100), 1).unwrap();
    assert_eq!(frame, common::fixtures::four_bs_frame());
}

#[test]
fn partial_frame_is_returned_at_deadline() {
    let mut mock = MockTransport::new();
    let frame = common::fixtures::four_bs_frame();
    mock.push_bytes(&frame[..10]);

    let partial = read_frame(&mut mock, Duration::from_millis(20), 1).unwrap();
    // the inter-byte timeout discards what was buffered
    assert!(partial.len() < frame.len());
}

#[test]
fn await_discards_unwanted_and_corrupt_frames() {
    let mut mock = MockTransport::new();
    let mut corrupt = common::fixtures::id_base_response_frame();
    corrupt[7] ^= 0xFF;
    mock.push_bytes(&corrupt);
    mock.push_bytes(&common::fixtures::four_bs_frame());
    mock.push_bytes(&common::fixtures::id_base_response_frame());

    let found = await_packet(&mut mock, Duration::from_millis(200), 1, |p| {
        p.packet_type == PacketType::RESPONSE
    })
    .unwrap()
    .unwrap();
    assert_eq!(
        found,
        Packet::decode(&common::fixtures::id_base_response_frame()).unwrap()
    );
}

#[test]
fn await_times_out_with_none() {
    let mut mock = MockTransport::new();
    mock.push_bytes(&common::fixtures::four_bs_frame());
    let found = await_packet(&mut mock, Duration::from_millis(20), 1, |p| {
        p.packet_type == PacketType::RESPONSE
    })
    .unwrap();
    assert!(found.is_none());
}

#[test]
fn drain_counts_complete_frames() {
    let mut mock = MockTransport::new();
    mock.push_bytes(&common::fixtures::four_bs_frame());
    mock.push_bytes(&common::fixtures::four_bs_frame());
    assert_eq!(drain(&mut mock, Duration::from_millis(20), 1).unwrap(), 2);
}
