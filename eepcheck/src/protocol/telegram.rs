// eepcheck/src/protocol/telegram.rs

use crate::constants::{ERP1_DBM, ERP1_SECURITY_LEVEL, ERP1_SUB_TEL_NUM, RORG_4BS};
use crate::protocol::frame::{Packet, PacketType};
use crate::types::DeviceAddress;
use crate::{Error, Result};

/// Radio telegram carried in a RADIO_ERP1 packet.
///
/// data     = `[RORG][payload..][sender(4)][status]`
/// optional = `[sub telegram count][destination(4)][dBm][security level]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erp1Telegram {
    pub rorg: u8,
    pub payload: Vec<u8>,
    pub sender: DeviceAddress,
    pub status: u8,
    pub destination: DeviceAddress,
    pub sub_tel_num: u8,
    pub dbm: u8,
    pub security_level: u8,
}

impl Erp1Telegram {
    /// Broadcast telegram with the defaults used for injected sensor data.
    pub fn new(rorg: u8, payload: Vec<u8>, sender: DeviceAddress) -> Self {
        Self {
            rorg,
            payload,
            sender,
            status: 0x00,
            destination: DeviceAddress::BROADCAST,
            sub_tel_num: ERP1_SUB_TEL_NUM,
            dbm: ERP1_DBM,
            security_level: ERP1_SECURITY_LEVEL,
        }
    }

    /// 4BS telegram (four data bytes DB3..DB0)
    pub fn four_bs(payload: [u8; 4], sender: DeviceAddress) -> Self {
        Self::new(RORG_4BS, payload.to_vec(), sender)
    }

    pub fn to_packet(&self) -> Packet {
        let mut data = Vec::with_capacity(self.payload.len() + 6);
        data.push(self.rorg);
        data.extend_from_slice(&self.payload);
        data.extend_from_slice(self.sender.as_bytes());
        data.push(self.status);

        let mut optional = Vec::with_capacity(7);
        optional.push(self.sub_tel_num);
        optional.extend_from_slice(self.destination.as_bytes());
        optional.push(self.dbm);
        optional.push(self.security_level);

        Packet::new(PacketType::RADIO_ERP1, data, optional)
    }

    /// Complete wire frame
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.to_packet().encode()
    }

    /// Split a RADIO_ERP1 packet back into its fields. Missing optional
    /// data falls back to the defaults.
    pub fn from_packet(packet: &Packet) -> Result<Self> {
        if packet.packet_type != PacketType::RADIO_ERP1 {
            return Err(Error::UnexpectedResponse {
                expected: PacketType::RADIO_ERP1.as_u8(),
                actual: packet.packet_type.as_u8(),
            });
        }
        let data = &packet.data;
        if data.len() < 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: data.len(),
            });
        }
        let sender_start = data.len() - 5;
        let sender = DeviceAddress::try_from(&data[sender_start..sender_start + 4])?;

        let opt = &packet.optional;
        let destination = if opt.len() >= 5 {
            DeviceAddress::try_from(&opt[1..5])?
        } else {
            DeviceAddress::BROADCAST
        };

        Ok(Self {
            rorg: data[0],
            payload: data[1..sender_start].to_vec(),
            sender,
            status: data[data.len() - 1],
            destination,
            sub_tel_num: opt.first().copied().unwrap_or(ERP1_SUB_TEL_NUM),
            dbm: opt.get(5).copied().unwrap_or(ERP1_DBM),
            security_level: opt.get(6).copied().unwrap_or(ERP1_SECURITY_LEVEL),
        })
    }

    /// Payload as a 4BS data block, when it is one.
    pub fn four_bs_payload(&self) -> Option<[u8; 4]> {
        if self.rorg != RORG_4BS {
            return None;
        }
        self.payload.as_slice().try_into().ok()
    }
}
