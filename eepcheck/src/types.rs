// eepcheck/src/types.rs

use crate::Error;
use derive_more::{Display, From};
use std::convert::TryFrom;
use std::str::FromStr;

/// DeviceAddress - Newtype Pattern (4 bytes, big-endian on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceAddress([u8; 4]);

impl DeviceAddress {
    pub const BROADCAST: Self = Self([0xFF; 4]);

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    /// Low 7 bits of the last byte: the offset a paired actuator adds to the
    /// gateway base ID.
    pub fn base_offset(&self) -> u8 {
        self.0[3] & 0x7F
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes()).to_uppercase()
    }
}

impl std::fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for DeviceAddress {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 4 {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 4];
        arr.copy_from_slice(&bytes[..4]);
        Ok(Self(arr))
    }
}

impl FromStr for DeviceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::utils::parse_hex(s).map_err(Error::FrameFormat)?;
        Self::try_from(&bytes[..])
    }
}

/// EEP identifier: RORG-FUNC-TYPE, written as six hex digits ("A50401").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EepId {
    pub rorg: u8,
    pub func: u8,
    pub kind: u8,
}

impl EepId {
    pub const fn new(rorg: u8, func: u8, kind: u8) -> Self {
        Self { rorg, func, kind }
    }

    /// Numeric form used by the device management system (`hexdec("A50401")`).
    pub fn as_u32(&self) -> u32 {
        ((self.rorg as u32) << 16) | ((self.func as u32) << 8) | self.kind as u32
    }
}

impl std::fmt::Display for EepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.rorg, self.func, self.kind)
    }
}

impl FromStr for EepId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| *c != '-').collect();
        if cleaned.len() != 6 {
            return Err(Error::InvalidEep(s.to_string()));
        }
        let bytes = crate::utils::parse_hex(&cleaned).map_err(|_| Error::InvalidEep(s.to_string()))?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EepId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EepId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Handle of a device created in the device management system
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(u64);

impl DeviceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A value read from or written to the device management system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view used for comparisons; booleans map to 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
