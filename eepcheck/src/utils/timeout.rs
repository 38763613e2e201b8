//! Timing defaults shared by the transport, the frame reader and the oracle.
//!
//! The gateway reader works with two clocks: a short per-byte timeout and an
//! overall deadline for one "await a matching packet" operation.

use std::time::Duration;

/// Overall deadline for awaiting one matching packet.
pub const DEFAULT_READ_DEADLINE_MS: u64 = 2000;

/// Per-byte read timeout. A timeout in the middle of a frame drops the
/// partial buffer.
pub const DEFAULT_BYTE_TIMEOUT_MS: u64 = 100;

/// Pause after each transmission so the gateway can put the telegram on air.
pub const DEFAULT_SETTLE_MS: u64 = 50;

/// How long actuator checks drain stale frames before writing values.
pub const DEFAULT_DRAIN_MS: u64 = 100;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default read deadline as Duration.
pub fn default_read_deadline() -> Duration {
    ms(DEFAULT_READ_DEADLINE_MS)
}
