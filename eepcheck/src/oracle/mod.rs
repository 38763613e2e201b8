// eepcheck/src/oracle/mod.rs
//! Verification oracle: drives one profile at a time through priming and
//! an exhaustive sweep, comparing every value the device management system
//! reports against the codec's own decode.

pub mod actuator;

use log::{debug, info, warn};

use crate::config::OracleConfig;
use crate::eep::{EepCodec, Profile, Reading};
use crate::error::Mismatch;
use crate::proxy::DeviceManager;
use crate::session::{Bound, Gateway};
use crate::types::{DeviceId, EepId};
use crate::{Error, Result};

pub use actuator::Actuator;

/// Lifecycle of one profile run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileState {
    Created,
    Priming,
    Sweeping,
    Passed,
    Failed,
    Deleted,
}

impl ProfileState {
    pub fn can_advance_to(self, next: ProfileState) -> bool {
        use ProfileState::*;
        matches!(
            (self, next),
            (Created, Priming)
                | (Priming, Sweeping)
                | (Sweeping, Passed)
                | (Passed, Deleted)
                | (Created | Priming | Sweeping, Failed)
                | (Failed, Deleted)
        )
    }
}

/// Tracks the state of the device currently under test.
#[derive(Debug)]
pub(crate) struct ProfileRun {
    eep: EepId,
    device: DeviceId,
    state: ProfileState,
}

impl ProfileRun {
    fn new(eep: EepId, device: DeviceId) -> Self {
        debug!("{} peer {}: {:?}", eep, device, ProfileState::Created);
        Self {
            eep,
            device,
            state: ProfileState::Created,
        }
    }

    pub(crate) fn advance(&mut self, next: ProfileState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "{:?} -> {:?}",
            self.state,
            next
        );
        debug!("{} peer {}: {:?} -> {:?}", self.eep, self.device, self.state, next);
        self.state = next;
    }
}

/// Outcome of a passed profile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileReport {
    pub eep: EepId,
    /// Telegrams whose decode was confirmed
    pub codes_checked: usize,
    /// Extra sends spent on transient mismatches
    pub retries: u32,
}

impl ProfileReport {
    fn new(eep: EepId) -> Self {
        Self {
            eep,
            codes_checked: 0,
            retries: 0,
        }
    }
}

fn same_value(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Runs profiles strictly one after another; each send precedes its read.
pub struct Oracle<'a> {
    gateway: &'a mut Gateway<Bound>,
    manager: &'a mut dyn DeviceManager,
    config: OracleConfig,
}

impl<'a> Oracle<'a> {
    pub fn new(
        gateway: &'a mut Gateway<Bound>,
        manager: &'a mut dyn DeviceManager,
        config: OracleConfig,
    ) -> Self {
        Self {
            gateway,
            manager,
            config,
        }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Run profiles in order, stopping at the first failure.
    pub fn run_all(&mut self, profiles: &[&Profile]) -> Result<Vec<ProfileReport>> {
        profiles.iter().map(|p| self.run_profile(p)).collect()
    }

    /// Create a device, prime it, sweep every raw code and delete it. On
    /// failure the device is still deleted (best effort) and the original
    /// error returned.
    pub fn run_profile(&mut self, profile: &Profile) -> Result<ProfileReport> {
        info!(
            "testing {} ({}): {} telegrams",
            profile.eep,
            profile.description,
            profile.sweep_len()
        );
        let report = self.with_device(profile.eep, |oracle, id, run| {
            run.advance(ProfileState::Priming);
            oracle.prime(profile, id)?;
            run.advance(ProfileState::Sweeping);
            oracle.sweep(profile, id)
        })?;
        info!(
            "{} passed: {} codes, {} retries",
            report.eep, report.codes_checked, report.retries
        );
        Ok(report)
    }

    /// Device lifecycle shared by sensor and actuator checks.
    pub(crate) fn with_device<F>(&mut self, eep: EepId, body: F) -> Result<ProfileReport>
    where
        F: FnOnce(&mut Self, DeviceId, &mut ProfileRun) -> Result<ProfileReport>,
    {
        let session = self.gateway.session().clone();
        let id = self
            .manager
            .create_device(eep, session.address(), session.interface())?;
        let mut run = ProfileRun::new(eep, id);

        match body(self, id, &mut run) {
            Ok(report) => {
                run.advance(ProfileState::Passed);
                self.manager.delete_device(id)?;
                run.advance(ProfileState::Deleted);
                Ok(report)
            }
            Err(e) => {
                run.advance(ProfileState::Failed);
                if let Err(cleanup) = self.manager.delete_device(id) {
                    warn!("could not delete peer {}: {}", id, cleanup);
                }
                run.advance(ProfileState::Deleted);
                Err(e)
            }
        }
    }

    /// Send `payload` `priming_repeats` times.
    pub(crate) fn send_repeated(&mut self, payload: &[u8]) -> Result<()> {
        for _ in 0..self.config.priming_repeats {
            self.gateway.send_payload(payload)?;
        }
        Ok(())
    }

    /// Boundary checks: every listed value must match exactly.
    pub(crate) fn prime(&mut self, profile: &Profile, id: DeviceId) -> Result<()> {
        for step in profile.priming {
            debug!("{} priming: {}", profile.eep, step.label);
            for telegram in step.telegrams {
                self.send_repeated(telegram)?;
            }

            let mut mismatches = Vec::new();
            for &(name, expected) in step.expect {
                let field = profile.field(name)?;
                let actual = self.manager.get_number(id, field.channel, name)?;
                if !same_value(actual, expected) {
                    mismatches.push(Mismatch {
                        field: name.to_string(),
                        expected,
                        actual,
                        expected_code: None,
                        actual_code: None,
                    });
                }
            }
            if !mismatches.is_empty() {
                return Err(Error::PrimingFailed {
                    eep: profile.eep,
                    step: step.label.to_string(),
                    mismatches,
                });
            }
        }
        Ok(())
    }

    fn sweep(&mut self, profile: &Profile, id: DeviceId) -> Result<ProfileReport> {
        let codec = EepCodec::new(profile);
        let mut report = ProfileReport::new(profile.eep);

        for sweep in profile.sweeps {
            debug!("{} sweep: {} ({}..=0)", profile.eep, sweep.label, sweep.top);
            for index in sweep.indices() {
                let payload = codec.sweep_payload(sweep, index)?;
                let expected = codec.decode_values(&payload)?;
                report.retries += self.confirm(profile, id, index, &payload, &expected)?;
                report.codes_checked += 1;
            }
        }
        Ok(report)
    }

    /// Send one sweep telegram until the reported values agree, at most
    /// `max_retries` extra times. Returns the number of retries spent.
    fn confirm(
        &mut self,
        profile: &Profile,
        id: DeviceId,
        index: u32,
        payload: &[u8],
        expected: &[Reading],
    ) -> Result<u32> {
        let mut retries = 0;
        loop {
            self.gateway.send_payload(payload)?;
            let mismatches = self.compare(profile, id, expected)?;
            if mismatches.is_empty() {
                return Ok(retries);
            }
            if retries >= self.config.max_retries {
                return Err(Error::ValueMismatch {
                    eep: profile.eep,
                    code: index,
                    mismatches,
                });
            }
            retries += 1;
            debug!(
                "{} code {}: retry {}/{} ({})",
                profile.eep, index, retries, self.config.max_retries, mismatches[0]
            );
        }
    }

    /// Compare reported values in raw-code space under the configured
    /// tolerance.
    fn compare(
        &mut self,
        profile: &Profile,
        id: DeviceId,
        expected: &[Reading],
    ) -> Result<Vec<Mismatch>> {
        let tolerance = self.config.code_tolerance as i64;
        let mut mismatches = Vec::new();
        for reading in expected {
            let field = profile.field(reading.field)?;
            let actual = self.manager.get_number(id, field.channel, field.name)?;
            let expected_code = field.nearest_code(reading.value);
            let actual_code = field.nearest_code(actual);
            if (expected_code - actual_code).abs() > tolerance {
                mismatches.push(Mismatch {
                    field: field.name.to_string(),
                    expected: reading.value,
                    actual,
                    expected_code: Some(expected_code),
                    actual_code: Some(actual_code),
                });
            }
        }
        Ok(mismatches)
    }
}
