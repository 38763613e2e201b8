// eepcheck/src/eep/codec.rs

use log::trace;

use crate::eep::field::Selector;
use crate::eep::profile::{Profile, Sweep};
use crate::{Error, Result};

/// Decoded value of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reading {
    pub field: &'static str,
    pub code: u32,
    pub value: f64,
    /// False when the field's gate was closed and `value` is its fallback.
    pub available: bool,
}

/// Result of decoding a profile payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Learn bit clear; carries no values.
    TeachIn,
    Data(Vec<Reading>),
}

/// Encode/decode engine driven by a profile table entry.
#[derive(Debug, Clone, Copy)]
pub struct EepCodec<'a> {
    profile: &'a Profile,
}

impl<'a> EepCodec<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'a Profile {
        self.profile
    }

    fn check_len(&self, payload: &[u8]) -> Result<()> {
        let expected = self.profile.payload_len()?;
        if payload.len() != expected {
            return Err(Error::MalformedPayload {
                expected,
                actual: payload.len(),
            });
        }
        Ok(())
    }

    fn blank(&self) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; self.profile.payload_len()?];
        Profile::LEARN_BIT.insert(&mut payload, 1);
        Ok(payload)
    }

    pub fn is_teach_in(&self, payload: &[u8]) -> Result<bool> {
        self.check_len(payload)?;
        Ok(Profile::LEARN_BIT.extract(payload) == 0)
    }

    /// Decode a payload as a receiver would: teach-in telegrams carry no
    /// values.
    pub fn decode(&self, payload: &[u8]) -> Result<Decoded> {
        if self.is_teach_in(payload)? {
            return Ok(Decoded::TeachIn);
        }
        self.decode_values(payload).map(Decoded::Data)
    }

    /// Decode every field regardless of the learn bit. Closed gates yield
    /// the field's fallback; an open gate over an out-of-domain code is an
    /// error.
    pub fn decode_values(&self, payload: &[u8]) -> Result<Vec<Reading>> {
        self.check_len(payload)?;
        self.profile
            .fields
            .iter()
            .map(|field| {
                let code = field.bits.extract(payload);
                if !field.is_available(payload) {
                    return Ok(Reading {
                        field: field.name,
                        code,
                        value: field.fallback,
                        available: false,
                    });
                }
                Ok(Reading {
                    field: field.name,
                    code,
                    value: field.physical_of(code)?,
                    available: true,
                })
            })
            .collect()
    }

    /// Build a data payload from raw codes. Each named field's gate is
    /// opened; two fields needing different values of the same selector
    /// bits are rejected.
    pub fn encode_codes(&self, codes: &[(&str, u32)]) -> Result<Vec<u8>> {
        let mut payload = self.blank()?;
        let mut gates: Vec<(Selector, &'static str)> = Vec::new();

        for &(name, code) in codes {
            let field = self.profile.field(name)?;
            field.check_code(code)?;
            field.bits.insert(&mut payload, code);

            if let Some(gate) = field.gate {
                if let Some((_, first)) = gates
                    .iter()
                    .find(|(g, _)| g.bits == gate.bits && g.value != gate.value)
                {
                    return Err(Error::ConflictingGate {
                        first: first.to_string(),
                        second: field.name.to_string(),
                    });
                }
                gates.push((gate, field.name));
            }
        }

        for (gate, _) in &gates {
            gate.apply(&mut payload);
        }
        Ok(payload)
    }

    /// Build a data payload from physical values.
    pub fn encode_values(&self, values: &[(&str, f64)]) -> Result<Vec<u8>> {
        let codes = values
            .iter()
            .map(|&(name, v)| Ok((name, self.profile.field(name)?.code_of(v)?)))
            .collect::<Result<Vec<_>>>()?;
        self.encode_codes(&codes)
    }

    /// Payload for one sweep index: every driven field gets its derived
    /// code and the sweep's fixed flags are set. Gates are left to the
    /// flags, so range-selected fields may share an index.
    pub fn sweep_payload(&self, sweep: &Sweep, index: u32) -> Result<Vec<u8>> {
        let mut payload = self.blank()?;
        for drive in sweep.drives {
            let field = self.profile.field(drive.field)?;
            let code = drive.derive.apply(index);
            field.check_code(code)?;
            field.bits.insert(&mut payload, code);
        }
        for flag in sweep.flags {
            flag.apply(&mut payload);
        }
        trace!(
            "{} {} index {}: {:02X?}",
            self.profile.eep, sweep.label, index, payload
        );
        Ok(payload)
    }
}
