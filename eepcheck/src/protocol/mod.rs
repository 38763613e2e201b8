// eepcheck/src/protocol/mod.rs

pub mod checksum;
pub mod commands;
pub mod frame;
pub mod reader;
pub mod telegram;

pub use checksum::{crc8, crc8_update};
pub use frame::{Packet, PacketType};
pub use telegram::Erp1Telegram;
