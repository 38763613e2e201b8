// eepcheck/src/config.rs

//! Oracle tuning knobs

use std::time::Duration;

use crate::utils::timeout::{DEFAULT_BYTE_TIMEOUT_MS, DEFAULT_DRAIN_MS, DEFAULT_READ_DEADLINE_MS};

/// Accepted distance between expected and reported raw-code equivalents
pub const DEFAULT_CODE_TOLERANCE: u32 = 1;

/// Additional attempts at one raw code before a mismatch is confirmed
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Times each priming telegram is sent
pub const DEFAULT_PRIMING_REPEATS: u32 = 3;

/// Parameters of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OracleConfig {
    pub code_tolerance: u32,
    pub max_retries: u32,
    pub priming_repeats: u32,
    /// Overall deadline of one "await a matching packet"
    pub read_deadline_ms: u64,
    /// Per-byte timeout while awaiting packets
    pub byte_timeout_ms: u64,
    /// How long stale frames are drained before actuator checks
    pub drain_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            code_tolerance: DEFAULT_CODE_TOLERANCE,
            max_retries: DEFAULT_MAX_RETRIES,
            priming_repeats: DEFAULT_PRIMING_REPEATS,
            read_deadline_ms: DEFAULT_READ_DEADLINE_MS,
            byte_timeout_ms: DEFAULT_BYTE_TIMEOUT_MS,
            drain_ms: DEFAULT_DRAIN_MS,
        }
    }
}

impl OracleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code_tolerance(mut self, tolerance: u32) -> Self {
        self.code_tolerance = tolerance;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_priming_repeats(mut self, repeats: u32) -> Self {
        self.priming_repeats = repeats.max(1);
        self
    }

    pub fn with_read_deadline_ms(mut self, ms: u64) -> Self {
        self.read_deadline_ms = ms;
        self
    }

    pub fn with_byte_timeout_ms(mut self, ms: u64) -> Self {
        self.byte_timeout_ms = ms;
        self
    }

    pub fn with_drain_ms(mut self, ms: u64) -> Self {
        self.drain_ms = ms;
        self
    }

    pub fn read_deadline(&self) -> Duration {
        Duration::from_millis(self.read_deadline_ms)
    }

    pub fn drain_duration(&self) -> Duration {
        Duration::from_millis(self.drain_ms)
    }

    /// Sends per raw code before a mismatch is final
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}
