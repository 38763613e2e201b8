#[path = "../common/mod.rs"]
mod common;

use eepcheck::Error;
use eepcheck::protocol::frame::expected_frame_len;
use eepcheck::protocol::{Packet, PacketType};
use proptest::prelude::*;

#[test]
fn corrupt_header_crc_is_rejected() {
    let mut frame = common::fixtures::four_bs_frame();
    frame[5] ^= 0x01;
    assert!(matches!(
        Packet::decode(&frame),
        Err(Error::ChecksumMismatch { .. })
    ));
}

#[test]
fn corrupt_data_is_rejected() {
    let mut frame = common::fixtures::four_bs_frame();
    frame[8] = 0xFB;
    assert!(matches!(
        Packet::decode(&frame),
        Err(Error::ChecksumMismatch { .. })
    ));
}

#[test]
fn truncated_frame_is_rejected() {
    let frame = common::fixtures::four_bs_frame();
    assert!(Packet::decode(&frame[..20]).is_err());
}

fn packet_type() -> impl Strategy<Value = PacketType> {
    prop_oneof![
        Just(PacketType::RADIO_ERP1),
        Just(PacketType::RESPONSE),
        Just(PacketType::EVENT),
        Just(PacketType::COMMON_COMMAND),
        Just(PacketType::RADIO_ERP2),
    ]
}

proptest! {
    #[test]
    fn encode_decode_reconstructs_packet(
        packet_type in packet_type(),
        data in proptest::collection::vec(any::<u8>(), 0..=255),
        optional in proptest::collection::vec(any::<u8>(), 0..=255),
    ) {
        let packet = Packet::new(packet_type, data, optional);
        let frame = packet.encode().unwrap();
        prop_assert_eq!(Packet::decode(&frame).unwrap(), packet);
    }

    #[test]
    fn frame_length_law(
        data in proptest::collection::vec(any::<u8>(), 0..=255),
        optional in proptest::collection::vec(any::<u8>(), 0..=255),
    ) {
        let frame = Packet::new(PacketType::RADIO_ERP1, data, optional).encode().unwrap();
        let declared = ((frame[1] as usize) << 8 | frame[2] as usize) + frame[3] as usize + 7;
        prop_assert_eq!(frame.len(), declared);
        prop_assert_eq!(expected_frame_len(&frame), Some(declared));
    }
}
