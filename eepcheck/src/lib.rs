// eepcheck/src/lib.rs

//! eepcheck
//!
//! Conformance harness for EnOcean Equipment Profile decoding. Synthetic
//! 4BS telegrams are injected through an ESP3 gateway and the values a
//! device management system decodes from them are checked against an
//! independent codec, one raw code at a time.

pub mod config;
pub mod constants;
pub mod eep;
pub mod error;
pub mod oracle;
pub mod prelude;
pub mod protocol;
pub mod proxy;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are reachable without the module path.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
