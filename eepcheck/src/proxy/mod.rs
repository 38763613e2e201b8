// eepcheck/src/proxy/mod.rs
//! Process boundary to the device management system under test.

pub mod homegear;
pub mod traits;

pub use homegear::HomegearConsole;
pub use traits::DeviceManager;
