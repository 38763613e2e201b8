// eepcheck/src/transport/serial.rs
//! Serial link to a USB 300 style gateway, using the `serialport` crate.

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serialport::SerialPort;

use crate::constants::DEFAULT_BAUD_RATE;
use crate::transport::traits::Transport;
use crate::utils::{DEFAULT_BYTE_TIMEOUT_MS, DEFAULT_SETTLE_MS, bytes_to_hex_spaced, ms};
use crate::{Error, Result};

/// Serial port configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0`
    pub path: String,
    pub baud_rate: u32,
    /// Initial read timeout; individual reads pass their own.
    pub byte_timeout_ms: u64,
    /// Delay after each write so the telegram is on air before the next
    /// read-back.
    pub settle_ms: u64,
    /// Close and reopen the port before every transmission. The gateway
    /// enforces its duty-cycle budget per connection.
    pub reconnect_before_send: bool,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            byte_timeout_ms: DEFAULT_BYTE_TIMEOUT_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            reconnect_before_send: true,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_settle_ms(mut self, settle_ms: u64) -> Self {
        self.settle_ms = settle_ms;
        self
    }
}

/// Serial transport. Single owner; not safe to share.
pub struct SerialTransport {
    config: SerialConfig,
    port: Option<Box<dyn SerialPort>>,
    current_timeout_ms: u64,
    connects: usize,
}

impl SerialTransport {
    /// Open the port described by `config`.
    pub fn open(config: SerialConfig) -> Result<Self> {
        let mut transport = Self {
            current_timeout_ms: config.byte_timeout_ms,
            config,
            port: None,
            connects: 0,
        };
        transport.connect()?;
        info!(
            "opened {} at {} baud",
            transport.config.path, transport.config.baud_rate
        );
        Ok(transport)
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Times the device has been opened, including the initial open.
    pub fn connects(&self) -> usize {
        self.connects
    }

    fn connect(&mut self) -> Result<()> {
        let port = serialport::new(&self.config.path, self.config.baud_rate)
            .timeout(ms(self.current_timeout_ms))
            .open()?;
        self.port = Some(port);
        self.connects += 1;
        Ok(())
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        if self.port.is_none() {
            self.connect()?;
        }
        self.port
            .as_mut()
            .ok_or_else(|| Error::FrameFormat("serial port not open".into()))
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.config.reconnect_before_send {
            self.reset()?;
        }
        debug!("tx {}", bytes_to_hex_spaced(data));
        let port = self.port()?;
        port.write_all(data)?;
        port.flush()?;
        thread::sleep(Duration::from_millis(self.config.settle_ms));
        Ok(())
    }

    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8> {
        if timeout_ms != self.current_timeout_ms {
            self.current_timeout_ms = timeout_ms;
            let port = self.port()?;
            port.set_timeout(ms(timeout_ms))?;
        }
        let port = self.port()?;
        let mut buf = [0u8; 1];
        match port.read(&mut buf) {
            Ok(1) => Ok(buf[0]),
            Ok(_) => Err(Error::Timeout),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Err(Error::Timeout),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn reset(&mut self) -> Result<()> {
        // Dropping the handle closes the device.
        self.port = None;
        self.connect()
    }

    fn describe(&self) -> String {
        format!("{} @ {} baud", self.config.path, self.config.baud_rate)
    }
}
