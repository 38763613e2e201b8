// fixtures.rs — wire-exact frames shared by the integration tests

use eepcheck::DeviceAddress;

pub const GATEWAY_ADDRESS: [u8; 4] = [0xFF, 0x80, 0x12, 0x80];

pub fn gateway_address() -> DeviceAddress {
    DeviceAddress::from_bytes(GATEWAY_ADDRESS)
}

/// CO_RD_IDBASE request
pub fn read_id_base_frame() -> Vec<u8> {
    hex::decode("5500010005700838").unwrap()
}

/// RET_OK response carrying FF801280
pub fn id_base_response_frame() -> Vec<u8> {
    hex::decode("55000501 02DB 00FF801280 0A FC".replace(' ', "")).unwrap()
}

/// 4BS telegram `00 FA FA 08` sent by FF801280
pub fn four_bs_frame() -> Vec<u8> {
    hex::decode("55000A0701EB A500FAFA08FF80128000 01FFFFFFFF0000 C0".replace(' ', "")).unwrap()
}
