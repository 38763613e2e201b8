// Shared helpers for the integration test crates. Each aggregator pulls
// this in with `#[path]`, so not every helper is used everywhere.
#![allow(dead_code)]

pub mod fixtures;

use eepcheck::OracleConfig;

/// Oracle settings that keep simulated runs fast: the simulation answers
/// synchronously, so deadlines only matter on failure paths.
pub fn fast_config() -> OracleConfig {
    OracleConfig::default()
        .with_read_deadline_ms(50)
        .with_byte_timeout_ms(1)
        .with_drain_ms(5)
}
