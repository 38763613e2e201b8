// eepcheck/src/eep/field.rs

use crate::{Error, Result};

/// Bit range inside a payload. Offsets count from the most significant bit
/// of the first payload byte, so for a 4BS block DB3.7 is offset 0 and
/// DB0.0 is offset 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub offset: u8,
    pub width: u8,
}

impl BitRange {
    pub const fn new(offset: u8, width: u8) -> Self {
        Self { offset, width }
    }

    /// Single bit
    pub const fn bit(offset: u8) -> Self {
        Self::new(offset, 1)
    }

    /// Whole 4BS data byte `DBn` (n = 3..0)
    pub const fn db(n: u8) -> Self {
        Self::new((3 - n) * 8, 8)
    }

    /// Largest code representable in this range.
    pub fn max_code(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Whether the range lies inside a payload of `len` bytes.
    pub fn fits(&self, len: usize) -> bool {
        self.offset as usize + self.width as usize <= len * 8
    }

    /// Read the code stored in this range. The caller checks `fits`.
    pub fn extract(&self, payload: &[u8]) -> u32 {
        debug_assert!(self.fits(payload.len()));
        (0..self.width as usize).fold(0u32, |acc, k| {
            let bit = self.offset as usize + k;
            let b = (payload[bit / 8] >> (7 - bit % 8)) & 1;
            (acc << 1) | b as u32
        })
    }

    /// Store `code` in this range, leaving other bits untouched. Bits of
    /// `code` above the range width are dropped.
    pub fn insert(&self, payload: &mut [u8], code: u32) {
        debug_assert!(self.fits(payload.len()));
        let width = self.width as usize;
        for k in 0..width {
            let bit = self.offset as usize + k;
            let mask = 0x80u8 >> (bit % 8);
            if (code >> (width - 1 - k)) & 1 == 1 {
                payload[bit / 8] |= mask;
            } else {
                payload[bit / 8] &= !mask;
            }
        }
    }
}

/// A bit range that must hold a given value: selector/availability bits
/// gating a field, or fixed flags of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub bits: BitRange,
    pub value: u32,
}

impl Selector {
    pub const fn new(bits: BitRange, value: u32) -> Self {
        Self { bits, value }
    }

    pub fn is_set(&self, payload: &[u8]) -> bool {
        self.bits.extract(payload) == self.value
    }

    pub fn apply(&self, payload: &mut [u8]) {
        self.bits.insert(payload, self.value);
    }
}

/// Direction of the scale: whether the physical value grows with the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Rising,
    Falling,
}

/// One analog value inside a profile payload.
///
/// `physical = physical_min + (code - code_min) * (physical span / code span)`
/// for rising fields; falling fields count down from `physical_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueField {
    /// Variable name in the device management system
    pub name: &'static str,
    pub channel: i32,
    pub bits: BitRange,
    pub code_min: u32,
    pub code_max: u32,
    pub physical_min: f64,
    pub physical_max: f64,
    pub polarity: Polarity,
    pub unit: &'static str,
    /// The field only carries data while this selector holds.
    pub gate: Option<Selector>,
    /// Reported value while the gate is closed.
    pub fallback: f64,
}

impl ValueField {
    /// Rising field on channel 1 spanning the whole code domain; falls back
    /// to `physical_min`.
    pub const fn linear(
        name: &'static str,
        bits: BitRange,
        codes: (u32, u32),
        physical: (f64, f64),
        unit: &'static str,
    ) -> Self {
        Self {
            name,
            channel: 1,
            bits,
            code_min: codes.0,
            code_max: codes.1,
            physical_min: physical.0,
            physical_max: physical.1,
            polarity: Polarity::Rising,
            unit,
            gate: None,
            fallback: physical.0,
        }
    }

    pub const fn falling(mut self) -> Self {
        self.polarity = Polarity::Falling;
        self
    }

    pub const fn gated(mut self, gate: Selector, fallback: f64) -> Self {
        self.gate = Some(gate);
        self.fallback = fallback;
        self
    }

    fn code_span(&self) -> f64 {
        (self.code_max - self.code_min) as f64
    }

    fn physical_span(&self) -> f64 {
        self.physical_max - self.physical_min
    }

    /// Physical units per raw code.
    pub fn resolution(&self) -> f64 {
        self.physical_span() / self.code_span()
    }

    /// Whether the gate (if any) lets this field carry data.
    pub fn is_available(&self, payload: &[u8]) -> bool {
        self.gate.is_none_or(|g| g.is_set(payload))
    }

    pub fn check_code(&self, code: u32) -> Result<()> {
        if code < self.code_min || code > self.code_max {
            return Err(Error::OutOfDomain {
                field: self.name.to_string(),
                value: code as f64,
                min: self.code_min as f64,
                max: self.code_max as f64,
            });
        }
        Ok(())
    }

    /// Physical value of a raw code.
    pub fn physical_of(&self, code: u32) -> Result<f64> {
        self.check_code(code)?;
        let steps = (code - self.code_min) as f64;
        Ok(match self.polarity {
            Polarity::Rising => self.physical_min + steps * self.resolution(),
            Polarity::Falling => self.physical_max - steps * self.resolution(),
        })
    }

    /// Raw-code equivalent of any physical value, without domain checks.
    /// Rounds half away from zero, once, after scaling.
    pub fn nearest_code(&self, physical: f64) -> i64 {
        let offset = match self.polarity {
            Polarity::Rising => physical - self.physical_min,
            Polarity::Falling => self.physical_max - physical,
        };
        self.code_min as i64 + (offset * (self.code_span() / self.physical_span())).round() as i64
    }

    /// Raw code for a physical value inside the declared domain.
    pub fn code_of(&self, physical: f64) -> Result<u32> {
        let slack = self.resolution().abs() / 2.0;
        let in_domain = physical.is_finite()
            && physical >= self.physical_min - slack
            && physical <= self.physical_max + slack;
        if !in_domain {
            return Err(Error::OutOfDomain {
                field: self.name.to_string(),
                value: physical,
                min: self.physical_min,
                max: self.physical_max,
            });
        }
        let code = self
            .nearest_code(physical)
            .clamp(self.code_min as i64, self.code_max as i64);
        Ok(code as u32)
    }
}
