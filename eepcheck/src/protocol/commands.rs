// eepcheck/src/protocol/commands.rs
//! Gateway commands used by the harness.

use crate::constants::{CO_RD_IDBASE, RET_OK};
use crate::protocol::frame::{Packet, PacketType};
use crate::types::DeviceAddress;
use crate::{Error, Result};

/// `CO_RD_IDBASE`: ask the gateway for its base ID.
pub fn read_id_base() -> Packet {
    Packet::new(PacketType::COMMON_COMMAND, vec![CO_RD_IDBASE], vec![])
}

/// True for a packet shaped like the base-ID response: RESPONSE type,
/// five data bytes, one optional byte.
pub fn is_id_base_response(packet: &Packet) -> bool {
    packet.packet_type == PacketType::RESPONSE && packet.data.len() == 5 && packet.optional.len() == 1
}

/// Parse the base-ID response into the session address.
pub fn parse_id_base_response(packet: &Packet) -> Result<DeviceAddress> {
    if packet.packet_type != PacketType::RESPONSE {
        return Err(Error::UnexpectedResponse {
            expected: PacketType::RESPONSE.as_u8(),
            actual: packet.packet_type.as_u8(),
        });
    }
    if packet.data.len() != 5 {
        return Err(Error::InvalidLength {
            expected: 5,
            actual: packet.data.len(),
        });
    }
    if packet.data[0] != RET_OK {
        return Err(Error::UnexpectedResponse {
            expected: RET_OK,
            actual: packet.data[0],
        });
    }
    let address = DeviceAddress::try_from(&packet.data[1..5])?;
    if address.is_zero() {
        return Err(Error::AddressUnavailable);
    }
    Ok(address)
}
