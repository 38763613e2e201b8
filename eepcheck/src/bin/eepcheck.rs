// eepcheck/src/bin/eepcheck.rs

//! Run the EEP conformance checks against a live gateway and Homegear.
//!
//! Usage:
//!   eepcheck /dev/ttyUSB0 MyEnOceanInterface
//!   eepcheck /dev/ttyUSB0 MyEnOceanInterface --profile A50401 --actuators

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use eepcheck::constants::DEFAULT_BAUD_RATE;
use eepcheck::eep::{PROFILES, Profile, find};
use eepcheck::oracle::{Actuator, Oracle};
use eepcheck::proxy::HomegearConsole;
use eepcheck::session::{Gateway, Session};
use eepcheck::transport::{SerialConfig, SerialTransport};
use eepcheck::{DeviceAddress, EepId, OracleConfig};

/// EnOcean EEP conformance harness for Homegear.
#[derive(Parser, Debug)]
#[command(name = "eepcheck", version, about)]
struct Cli {
    /// Serial device of the ESP3 gateway, e.g. /dev/ttyUSB0
    #[arg(required_unless_present = "list")]
    serial: Option<String>,

    /// Homegear interface name of the gateway
    #[arg(required_unless_present = "list")]
    interface: Option<String>,

    /// Only check these profiles (repeatable); default is every sensor profile
    #[arg(long = "profile", value_name = "EEP")]
    profiles: Vec<EepId>,

    /// Also check the A5-38-01/02 actuators
    #[arg(long)]
    actuators: bool,

    /// Print the supported profiles and exit
    #[arg(long)]
    list: bool,

    /// Accepted deviation in raw codes
    #[arg(long, default_value_t = eepcheck::config::DEFAULT_CODE_TOLERANCE)]
    tolerance: u32,

    /// Extra sends per code before a mismatch is fatal
    #[arg(long, default_value_t = eepcheck::config::DEFAULT_MAX_RETRIES)]
    retries: u32,

    /// Use this base address instead of asking the gateway, e.g. FF801280
    #[arg(long, value_name = "HEX")]
    address: Option<DeviceAddress>,

    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Homegear executable
    #[arg(long, default_value = "homegear")]
    homegear: String,
}

fn list_profiles() {
    for p in PROFILES {
        println!("{}  {:<40} {} codes", p.eep, p.description, p.sweep_len());
    }
    for a in Actuator::ALL {
        println!("{}  {:?} actuator", a.eep(), a);
    }
}

fn selected(ids: &[EepId]) -> Result<Vec<&'static Profile>> {
    if ids.is_empty() {
        return Ok(PROFILES.iter().collect());
    }
    ids.iter()
        .map(|id| find(*id).with_context(|| format!("profile {}", id)))
        .collect()
}

fn run(cli: Cli) -> Result<()> {
    if cli.list {
        list_profiles();
        return Ok(());
    }
    let (Some(serial), Some(interface)) = (cli.serial, cli.interface) else {
        bail!("SERIAL and INTERFACE are required");
    };
    if !serial.contains('/') {
        bail!("{:?} is not a serial device path", serial);
    }
    let profiles = selected(&cli.profiles)?;

    let transport = SerialTransport::open(SerialConfig::new(&serial).with_baud_rate(cli.baud))
        .with_context(|| format!("opening {}", serial))?;
    let config = OracleConfig::default()
        .with_code_tolerance(cli.tolerance)
        .with_max_retries(cli.retries);

    let gateway = Gateway::new(Box::new(transport));
    let mut gateway = match cli.address {
        Some(address) => gateway.bind(Session::new(address, interface)),
        None => gateway
            .establish(&interface, config.read_deadline(), config.byte_timeout_ms)
            .context("reading gateway base address")?,
    };

    let mut homegear = HomegearConsole::with_program(cli.homegear);
    let mut oracle = Oracle::new(&mut gateway, &mut homegear, config);

    let reports = oracle.run_all(&profiles)?;
    let mut checked: usize = reports.iter().map(|r| r.codes_checked).sum();
    let mut passed = reports.len();
    if cli.actuators {
        for actuator in Actuator::ALL {
            checked += oracle.run_actuator(actuator)?.codes_checked;
            passed += 1;
        }
    }
    info!("all {} profiles passed ({} telegrams)", passed, checked);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
