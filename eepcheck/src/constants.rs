// eepcheck/src/constants.rs
//! Wire constants of the gateway's serial protocol (ESP3) and the radio
//! telegrams carried inside it.

/// Every frame starts with this marker byte.
pub const SYNC_BYTE: u8 = 0x55;

/// Sync byte + header + header CRC + data CRC
pub const FRAME_OVERHEAD: usize = 7;

/// Bytes that must be buffered before the total frame length is known
pub const LENGTH_PREFIX_LEN: usize = 6;

/// Maximum optional-data length (single length byte)
pub const MAX_OPTIONAL_LEN: usize = 0xFF;

/// Maximum data length (two length bytes)
pub const MAX_DATA_LEN: usize = 0xFFFF;

/// Common command: read the gateway's base ID
pub const CO_RD_IDBASE: u8 = 0x08;

/// Return codes carried in the first data byte of a RESPONSE packet
pub const RET_OK: u8 = 0x00;
pub const RET_ERROR: u8 = 0x01;
pub const RET_NOT_SUPPORTED: u8 = 0x02;
pub const RET_WRONG_PARAM: u8 = 0x03;
pub const RET_OPERATION_DENIED: u8 = 0x04;

/// Radio telegram organisations
pub const RORG_RPS: u8 = 0xF6;
pub const RORG_1BS: u8 = 0xD5;
pub const RORG_4BS: u8 = 0xA5;
pub const RORG_VLD: u8 = 0xD2;

/// Optional-data defaults for outgoing ERP1 telegrams
pub const ERP1_SUB_TEL_NUM: u8 = 0x01;
pub const ERP1_DBM: u8 = 0x00;
pub const ERP1_SECURITY_LEVEL: u8 = 0x00;

/// Learn bit of a 4BS payload: DB0 bit 3. Set on data telegrams, clear on
/// teach-in telegrams.
pub const LEARN_BIT_MASK: u8 = 0x08;

/// Default baud rate of USB 300 style gateways
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// EnOcean device family identifier used by the device management system
pub const ENOCEAN_FAMILY_ID: u32 = 15;
