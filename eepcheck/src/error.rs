// eepcheck/src/error.rs

use thiserror::Error;

use crate::types::EepId;

/// One field whose reported value disagreed with the codec's expectation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mismatch {
    pub field: String,
    pub expected: f64,
    pub actual: f64,
    /// Raw-code equivalents used by the sweep comparison. `None` for exact
    /// priming checks.
    pub expected_code: Option<i64>,
    pub actual_code: Option<i64>,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.field, self.expected, self.actual
        )?;
        if let (Some(e), Some(a)) = (self.expected_code, self.actual_code) {
            write!(f, " (code {} vs {})", e, a)?;
        }
        Ok(())
    }
}

fn join_mismatches(list: &[Mismatch]) -> String {
    list.iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[cfg(feature = "serial")]
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("crc mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("unexpected response: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("operation timed out")]
    Timeout,

    #[error("could not read the base address from the gateway")]
    AddressUnavailable,

    #[error("device management error: {0}")]
    Proxy(String),

    #[error("{field}: value {value} outside domain [{min}, {max}]")]
    OutOfDomain {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("malformed payload: expected {expected} bytes, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    #[error("fields {first} and {second} require different selector bits")]
    ConflictingGate { first: String, second: String },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("invalid EEP identifier: {0}")]
    InvalidEep(String),

    #[error("EEP {eep}: priming step \"{step}\" failed: {}", join_mismatches(.mismatches))]
    PrimingFailed {
        eep: EepId,
        step: String,
        mismatches: Vec<Mismatch>,
    },

    #[error("EEP {eep}: wrong values for raw code {code}: {}", join_mismatches(.mismatches))]
    ValueMismatch {
        eep: EepId,
        code: u32,
        mismatches: Vec<Mismatch>,
    },

    #[error("EEP {eep}: no matching telegram for \"{step}\"")]
    NoTelegram { eep: EepId, step: String },
}

impl Error {
    /// `Timeout` means "nothing yet"; every other kind ends the run.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
