// eepcheck/src/eep/mod.rs
//! Equipment profile value codec: bit-packed payload fields and their
//! physical scaling, described as data and handled by one generic engine.

pub mod codec;
pub mod field;
pub mod profile;
pub mod profiles;

pub use codec::{Decoded, EepCodec, Reading};
pub use field::{BitRange, Polarity, Selector, ValueField};
pub use profile::{Derive, Drive, PrimingStep, Profile, Sweep};
pub use profiles::{A53802_STATUS, PROFILES, find};
