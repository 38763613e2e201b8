// eepcheck/src/bin/eepsniff.rs

//! Print every frame the gateway reports until interrupted.
//!
//! Usage:
//!   eepsniff /dev/ttyUSB0

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::warn;

use eepcheck::constants::{
    DEFAULT_BAUD_RATE, RET_ERROR, RET_NOT_SUPPORTED, RET_OK, RET_OPERATION_DENIED,
    RET_WRONG_PARAM, RORG_1BS, RORG_4BS, RORG_RPS, RORG_VLD,
};
use eepcheck::protocol::frame::is_complete;
use eepcheck::protocol::reader::read_frame;
use eepcheck::protocol::{Erp1Telegram, Packet, PacketType};
use eepcheck::transport::{SerialConfig, SerialTransport};
use eepcheck::utils::{DEFAULT_BYTE_TIMEOUT_MS, bytes_to_hex_spaced, default_read_deadline};

/// Dump ESP3 frames received from an EnOcean gateway.
#[derive(Parser, Debug)]
#[command(name = "eepsniff", version, about)]
struct Cli {
    /// Serial device of the ESP3 gateway, e.g. /dev/ttyUSB0
    serial: String,

    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,
}

fn rorg_name(rorg: u8) -> &'static str {
    match rorg {
        RORG_RPS => "RPS",
        RORG_1BS => "1BS",
        RORG_4BS => "4BS",
        RORG_VLD => "VLD",
        _ => "?",
    }
}

fn return_code_name(code: u8) -> &'static str {
    match code {
        RET_OK => "RET_OK",
        RET_ERROR => "RET_ERROR",
        RET_NOT_SUPPORTED => "RET_NOT_SUPPORTED",
        RET_WRONG_PARAM => "RET_WRONG_PARAM",
        RET_OPERATION_DENIED => "RET_OPERATION_DENIED",
        _ => "?",
    }
}

fn describe(packet: &Packet) -> String {
    let mut line = packet.packet_type.name().to_string();
    if packet.packet_type == PacketType::RADIO_ERP1 {
        if let Ok(t) = Erp1Telegram::from_packet(packet) {
            line.push_str(&format!(
                " {} ({:02X}) from {} [{}]",
                rorg_name(t.rorg),
                t.rorg,
                t.sender,
                bytes_to_hex_spaced(&t.payload)
            ));
        }
    } else if packet.packet_type == PacketType::RESPONSE {
        if let Some(&code) = packet.data.first() {
            line.push(' ');
            line.push_str(return_code_name(code));
        }
    }
    line
}

fn run(cli: Cli) -> Result<()> {
    if !cli.serial.contains('/') {
        bail!("{:?} is not a serial device path", cli.serial);
    }
    let mut transport =
        SerialTransport::open(SerialConfig::new(&cli.serial).with_baud_rate(cli.baud))
            .with_context(|| format!("opening {}", cli.serial))?;

    loop {
        let frame = read_frame(&mut transport, default_read_deadline(), DEFAULT_BYTE_TIMEOUT_MS)?;
        if frame.is_empty() {
            continue;
        }
        if !is_complete(&frame) {
            warn!("incomplete frame: {}", bytes_to_hex_spaced(&frame));
            continue;
        }
        match Packet::decode(&frame) {
            Ok(packet) => println!("{}  {}", bytes_to_hex_spaced(&frame), describe(&packet)),
            Err(e) => warn!("{}: {}", bytes_to_hex_spaced(&frame), e),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
