// eepcheck/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the gateway's serial link away from the
/// protocol and oracle logic.
///
/// Implementations own the duty-cycle behaviour: a real serial link closes
/// and reopens the port before every transmission and waits a short settling
/// delay afterwards.
pub trait Transport {
    /// Send one complete frame to the gateway
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read a single byte. Returns `Error::Timeout` when nothing arrives
    /// within `timeout_ms`; any other error is a transport failure.
    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8>;

    /// Close and reopen the underlying link
    fn reset(&mut self) -> Result<()>;

    /// Human readable description for logs
    fn describe(&self) -> String {
        "transport".to_string()
    }
}
