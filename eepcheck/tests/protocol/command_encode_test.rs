#[path = "../common/mod.rs"]
mod common;

use eepcheck::Error;
use eepcheck::protocol::commands::{is_id_base_response, parse_id_base_response, read_id_base};
use eepcheck::protocol::{Erp1Telegram, Packet, PacketType};

#[test]
fn read_id_base_is_byte_exact() {
    assert_eq!(
        read_id_base().encode().unwrap(),
        common::fixtures::read_id_base_frame()
    );
}

#[test]
fn id_base_response_yields_address() {
    let packet = Packet::decode(&common::fixtures::id_base_response_frame()).unwrap();
    assert!(is_id_base_response(&packet));
    assert_eq!(
        parse_id_base_response(&packet).unwrap(),
        common::fixtures::gateway_address()
    );
}

#[test]
fn four_bs_telegram_is_byte_exact() {
    let telegram =
        Erp1Telegram::four_bs([0x00, 0xFA, 0xFA, 0x08], common::fixtures::gateway_address());
    assert_eq!(telegram.encode().unwrap(), common::fixtures::four_bs_frame());
}

#[test]
fn four_bs_telegram_parses_back() {
    let packet = Packet::decode(&common::fixtures::four_bs_frame()).unwrap();
    assert_eq!(packet.packet_type, PacketType::RADIO_ERP1);
    let telegram = Erp1Telegram::from_packet(&packet).unwrap();
    assert_eq!(telegram.four_bs_payload(), Some([0x00, 0xFA, 0xFA, 0x08]));
    assert_eq!(telegram.sender, common::fixtures::gateway_address());
}

#[test]
fn response_is_not_a_telegram() {
    let packet = Packet::decode(&common::fixtures::id_base_response_frame()).unwrap();
    assert!(Erp1Telegram::from_packet(&packet).is_err());
    assert!(matches!(
        parse_id_base_response(&Packet::new(PacketType::RESPONSE, vec![0x00], vec![])),
        Err(Error::InvalidLength { .. }) | Err(Error::AddressUnavailable)
    ));
}
