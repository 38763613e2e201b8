// eepcheck/src/eep/profile.rs
//! Declarative profile description consumed by the generic codec and oracle.

use crate::constants::RORG_4BS;
use crate::eep::field::{BitRange, Selector, ValueField};
use crate::types::EepId;
use crate::{Error, Result};

/// How a driven field's raw code is derived from the sweep index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derive {
    Identity,
    /// `index / n`, truncating
    Divide(u32),
    /// `index % n`
    Modulo(u32),
    /// `round(index * to / from)`
    Rescale { from: u32, to: u32 },
}

impl Derive {
    pub fn apply(&self, index: u32) -> u32 {
        match *self {
            Derive::Identity => index,
            Derive::Divide(n) => index / n,
            Derive::Modulo(n) => index % n,
            Derive::Rescale { from, to } => {
                (index as f64 * to as f64 / from as f64).round() as u32
            }
        }
    }
}

/// A field whose code follows the sweep index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drive {
    pub field: &'static str,
    pub derive: Derive,
}

impl Drive {
    pub const fn identity(field: &'static str) -> Self {
        Self {
            field,
            derive: Derive::Identity,
        }
    }

    pub const fn derived(field: &'static str, derive: Derive) -> Self {
        Self { field, derive }
    }
}

/// One descending enumeration of sweep indices `top..=0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub label: &'static str,
    pub top: u32,
    pub drives: &'static [Drive],
    /// Fixed bits set on every telegram of this sweep
    pub flags: &'static [Selector],
}

impl Sweep {
    /// Indices in transmission order.
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        (0..=self.top).rev()
    }

    /// Telegrams sent by this sweep, one per index.
    pub fn telegram_count(&self) -> usize {
        self.top as usize + 1
    }
}

/// Boundary check run before the sweep: every telegram is sent repeatedly,
/// in order, then each listed value must read back exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimingStep {
    pub label: &'static str,
    pub telegrams: &'static [[u8; 4]],
    pub expect: &'static [(&'static str, f64)],
}

/// Everything the harness knows about one sensor profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub eep: EepId,
    pub description: &'static str,
    pub fields: &'static [ValueField],
    pub priming: &'static [PrimingStep],
    pub sweeps: &'static [Sweep],
}

impl Profile {
    /// Learn bit position inside a 4BS payload
    pub const LEARN_BIT: BitRange = BitRange::bit(28);

    /// Payload bytes between RORG and sender. Only 4BS profiles are
    /// described, so anything else is a table bug.
    pub fn payload_len(&self) -> Result<usize> {
        match self.eep.rorg {
            RORG_4BS => Ok(4),
            _ => Err(Error::InvalidEep(self.eep.to_string())),
        }
    }

    pub fn field(&self, name: &str) -> Result<&ValueField> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownField(format!("{} in {}", name, self.eep)))
    }

    /// Total number of telegrams sent by all sweeps.
    pub fn sweep_len(&self) -> usize {
        self.sweeps.iter().map(Sweep::telegram_count).sum()
    }
}
