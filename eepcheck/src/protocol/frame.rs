// eepcheck/src/protocol/frame.rs

use crate::constants::{
    FRAME_OVERHEAD, LENGTH_PREFIX_LEN, MAX_DATA_LEN, MAX_OPTIONAL_LEN, SYNC_BYTE,
};
use crate::protocol::checksum::{crc8, crc8_chain};
use crate::{Error, Result};

/// Packet type byte of the serial protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketType(u8);

impl PacketType {
    pub const RADIO_ERP1: Self = Self(0x01);
    pub const RESPONSE: Self = Self(0x02);
    pub const RADIO_SUB_TEL: Self = Self(0x03);
    pub const EVENT: Self = Self(0x04);
    pub const COMMON_COMMAND: Self = Self(0x05);
    pub const SMART_ACK_COMMAND: Self = Self(0x06);
    pub const REMOTE_MAN_COMMAND: Self = Self(0x07);
    pub const RADIO_MESSAGE: Self = Self(0x09);
    pub const RADIO_ERP2: Self = Self(0x0A);

    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            0x01 => "RADIO_ERP1",
            0x02 => "RESPONSE",
            0x03 => "RADIO_SUB_TEL",
            0x04 => "EVENT",
            0x05 => "COMMON_COMMAND",
            0x06 => "SMART_ACK_COMMAND",
            0x07 => "REMOTE_MAN_COMMAND",
            0x09 => "RADIO_MESSAGE",
            0x0A => "RADIO_ERP2",
            _ => "UNKNOWN",
        }
    }
}

/// One gateway packet.
///
/// Wire format:
/// `[0x55][len_hi][len_lo][opt_len][type][header CRC][data..][optional..][data CRC]`
///
/// Both CRCs are computed by `encode` and verified by `decode`; they are
/// never stored on the struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub packet_type: PacketType,
    pub data: Vec<u8>,
    pub optional: Vec<u8>,
}

impl Packet {
    pub fn new(packet_type: PacketType, data: Vec<u8>, optional: Vec<u8>) -> Self {
        Self {
            packet_type,
            data,
            optional,
        }
    }

    /// Encode into a complete wire frame
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.data.len() > MAX_DATA_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_DATA_LEN,
                actual: self.data.len(),
            });
        }
        if self.optional.len() > MAX_OPTIONAL_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_OPTIONAL_LEN,
                actual: self.optional.len(),
            });
        }

        let len = self.data.len() as u16;
        let header = [
            (len >> 8) as u8,
            (len & 0xFF) as u8,
            self.optional.len() as u8,
            self.packet_type.as_u8(),
        ];

        let mut out = Vec::with_capacity(FRAME_OVERHEAD + self.data.len() + self.optional.len());
        out.push(SYNC_BYTE);
        out.extend_from_slice(&header);
        out.push(crc8(&header));
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.optional);
        out.push(crc8_chain(&[&self.data, &self.optional]));
        Ok(out)
    }

    /// Decode a complete wire frame, verifying sync byte, length law and
    /// both CRCs.
    pub fn decode(frame: &[u8]) -> Result<Self> {
        if frame.len() < FRAME_OVERHEAD {
            return Err(Error::InvalidLength {
                expected: FRAME_OVERHEAD,
                actual: frame.len(),
            });
        }
        if frame[0] != SYNC_BYTE {
            return Err(Error::FrameFormat("invalid sync byte".into()));
        }

        let header = &frame[1..5];
        let header_crc = crc8(header);
        if frame[5] != header_crc {
            return Err(Error::ChecksumMismatch {
                expected: header_crc,
                actual: frame[5],
            });
        }

        let required = expected_frame_len(frame).unwrap_or(FRAME_OVERHEAD);
        if frame.len() != required {
            return Err(Error::InvalidLength {
                expected: required,
                actual: frame.len(),
            });
        }

        let data_len = ((header[0] as usize) << 8) | header[1] as usize;
        let data_start = LENGTH_PREFIX_LEN;
        let opt_start = data_start + data_len;
        let opt_end = opt_start + header[2] as usize;
        let data = &frame[data_start..opt_start];
        let optional = &frame[opt_start..opt_end];

        let data_crc = crc8_chain(&[data, optional]);
        if frame[opt_end] != data_crc {
            return Err(Error::ChecksumMismatch {
                expected: data_crc,
                actual: frame[opt_end],
            });
        }

        Ok(Self {
            packet_type: PacketType::new(header[3]),
            data: data.to_vec(),
            optional: optional.to_vec(),
        })
    }
}

/// Total frame length announced by a buffered prefix:
/// `((len_hi << 8) | len_lo) + opt_len + 7`. `None` until six bytes are
/// available.
pub fn expected_frame_len(buffer: &[u8]) -> Option<usize> {
    if buffer.len() < LENGTH_PREFIX_LEN {
        return None;
    }
    let data_len = ((buffer[1] as usize) << 8) | buffer[2] as usize;
    Some(data_len + buffer[3] as usize + FRAME_OVERHEAD)
}

/// True when `buffer` holds exactly one complete frame.
pub fn is_complete(buffer: &[u8]) -> bool {
    expected_frame_len(buffer) == Some(buffer.len())
}
