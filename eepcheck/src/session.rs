// eepcheck/src/session.rs

use std::time::Duration;

use log::{debug, info};

use crate::constants::{RET_OK, RORG_4BS};
use crate::protocol::Packet;
use crate::protocol::commands::{is_id_base_response, parse_id_base_response, read_id_base};
use crate::protocol::reader;
use crate::protocol::telegram::Erp1Telegram;
use crate::transport::Transport;
use crate::types::DeviceAddress;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Context of one harness run: the gateway's radio address used as sender
/// of every injected telegram, and the interface name the device
/// management system knows the gateway by.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    address: DeviceAddress,
    interface: String,
}

impl Session {
    pub fn new(address: DeviceAddress, interface: impl Into<String>) -> Self {
        Self {
            address,
            interface: interface.into(),
        }
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

/// Type-state markers
pub struct Unbound;
pub struct Bound(Session);

/// Gateway handle. Telegrams can only be injected once a session address
/// is known.
pub struct Gateway<State = Unbound> {
    transport: Box<dyn Transport>,
    state: State,
}

impl Gateway<Unbound> {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            state: Unbound,
        }
    }

    /// Ask the gateway for its base ID and bind the session to it.
    /// Unrelated or corrupt frames are skipped until `deadline`.
    pub fn establish(
        mut self,
        interface: &str,
        deadline: Duration,
        byte_timeout_ms: u64,
    ) -> Result<Gateway<Bound>> {
        let frame = read_id_base().encode()?;
        debug!("-> {}", bytes_to_hex_spaced(&frame));
        self.transport.send(&frame)?;

        let response = reader::await_packet(&mut *self.transport, deadline, byte_timeout_ms, |p| {
            is_id_base_response(p) && p.data[0] == RET_OK
        })?
        .ok_or(Error::AddressUnavailable)?;

        let address = parse_id_base_response(&response)?;
        info!("gateway {} base address {}", self.transport.describe(), address);
        Ok(self.bind(Session::new(address, interface)))
    }

    /// Bind to a known session without querying the gateway.
    pub fn bind(self, session: Session) -> Gateway<Bound> {
        Gateway {
            transport: self.transport,
            state: Bound(session),
        }
    }
}

impl Gateway<Bound> {
    pub fn session(&self) -> &Session {
        &self.state.0
    }

    pub fn address(&self) -> DeviceAddress {
        self.state.0.address
    }

    /// Inject a 4BS telegram sent from the session address.
    pub fn send_payload(&mut self, payload: &[u8]) -> Result<()> {
        let telegram = Erp1Telegram::new(RORG_4BS, payload.to_vec(), self.address());
        self.send_packet(&telegram.to_packet())
    }

    pub fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        let frame = packet.encode()?;
        debug!("-> {}", bytes_to_hex_spaced(&frame));
        self.transport.send(&frame)
    }

    /// See [`reader::await_packet`].
    pub fn await_packet<F>(
        &mut self,
        deadline: Duration,
        byte_timeout_ms: u64,
        matches: F,
    ) -> Result<Option<Packet>>
    where
        F: FnMut(&Packet) -> bool,
    {
        reader::await_packet(&mut *self.transport, deadline, byte_timeout_ms, matches)
    }

    /// Discard whatever the gateway reports for `duration`.
    pub fn drain(&mut self, duration: Duration, byte_timeout_ms: u64) -> Result<usize> {
        let dropped = reader::drain(&mut *self.transport, duration, byte_timeout_ms)?;
        if dropped > 0 {
            debug!("drained {} stale frames", dropped);
        }
        Ok(dropped)
    }
}

impl<State> Gateway<State> {
    pub fn transport_mut(&mut self) -> &mut dyn Transport {
        &mut *self.transport
    }

    pub fn into_transport(self) -> Box<dyn Transport> {
        self.transport
    }
}
