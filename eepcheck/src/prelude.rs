// eepcheck/src/prelude.rs

pub use crate::config::OracleConfig;
pub use crate::eep::{Decoded, EepCodec, Profile, Reading, find};
pub use crate::oracle::{Actuator, Oracle, ProfileReport, ProfileState};
pub use crate::protocol::{Erp1Telegram, Packet, PacketType};
pub use crate::proxy::{DeviceManager, HomegearConsole};
pub use crate::session::{Bound, Gateway, Session, Unbound};
pub use crate::transport::Transport;
pub use crate::{DeviceAddress, DeviceId, EepId, Error, Mismatch, Result, Value};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
