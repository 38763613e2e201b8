// eepcheck/src/protocol/reader.rs
//! Streaming side of the frame codec: reassembles frames byte by byte from a
//! transport under a deadline.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::Result;
use crate::constants::SYNC_BYTE;
use crate::protocol::frame::{Packet, expected_frame_len, is_complete};
use crate::transport::Transport;

/// Read one frame.
///
/// Bytes are discarded until a sync byte opens a fresh buffer. A per-byte
/// timeout in the middle of a frame drops the partial buffer. When the
/// deadline passes first, whatever has been buffered is returned; callers
/// check `is_complete` and treat anything shorter as "nothing yet".
///
/// Only a genuine read error is returned as `Err`.
pub fn read_frame(
    transport: &mut dyn Transport,
    deadline: Duration,
    byte_timeout_ms: u64,
) -> Result<Vec<u8>> {
    let start = Instant::now();
    let mut buffer: Vec<u8> = Vec::new();

    while start.elapsed() < deadline {
        let byte = match transport.read_byte(byte_timeout_ms) {
            Ok(b) => b,
            Err(e) if e.is_timeout() => {
                if !buffer.is_empty() {
                    trace!("inter-byte timeout, dropping {} buffered bytes", buffer.len());
                    buffer.clear();
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        if buffer.is_empty() && byte != SYNC_BYTE {
            continue;
        }
        buffer.push(byte);

        if let Some(total) = expected_frame_len(&buffer) {
            if buffer.len() == total {
                return Ok(buffer);
            }
        }
    }

    Ok(buffer)
}

/// Await the first valid packet accepted by `matches`, discarding frames
/// that fail CRC checks or are not wanted. `Ok(None)` when the deadline
/// passes without a match.
pub fn await_packet<F>(
    transport: &mut dyn Transport,
    deadline: Duration,
    byte_timeout_ms: u64,
    mut matches: F,
) -> Result<Option<Packet>>
where
    F: FnMut(&Packet) -> bool,
{
    let start = Instant::now();
    loop {
        let remaining = match deadline.checked_sub(start.elapsed()) {
            Some(r) if !r.is_zero() => r,
            _ => return Ok(None),
        };

        let frame = read_frame(transport, remaining, byte_timeout_ms)?;
        if !is_complete(&frame) {
            continue;
        }

        match Packet::decode(&frame) {
            Ok(packet) if matches(&packet) => return Ok(Some(packet)),
            Ok(packet) => debug!(
                "discarding {} packet ({} data bytes)",
                packet.packet_type.name(),
                packet.data.len()
            ),
            Err(e) => warn!("discarding corrupt frame: {}", e),
        }
    }
}

/// Read and drop frames for `duration`. Returns how many complete frames
/// were discarded.
pub fn drain(transport: &mut dyn Transport, duration: Duration, byte_timeout_ms: u64) -> Result<usize> {
    let start = Instant::now();
    let mut dropped = 0;
    while let Some(remaining) = duration.checked_sub(start.elapsed()) {
        if remaining.is_zero() {
            break;
        }
        let frame = read_frame(transport, remaining, byte_timeout_ms)?;
        if is_complete(&frame) {
            dropped += 1;
        }
    }
    Ok(dropped)
}
