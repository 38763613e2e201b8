//! Test support helpers intended for use by unit and integration tests.
//!
//! [`SimulatedGateway`] plays both sides of a harness run: it is the
//! `Transport` the oracle writes telegrams to and the `DeviceManager` it
//! reads decoded values from. Injected telegrams are decoded with the
//! crate's own codec, so a clean run always passes; the fault hooks make
//! it misbehave in controlled ways.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::constants::{CO_RD_IDBASE, RET_OK};
use crate::eep::{A53802_STATUS, Decoded, EepCodec, Profile, find};
use crate::oracle::Actuator;
use crate::protocol::{Erp1Telegram, Packet, PacketType};
use crate::proxy::DeviceManager;
use crate::session::{Bound, Gateway, Session};
use crate::transport::Transport;
use crate::types::{DeviceAddress, DeviceId, EepId, Value};
use crate::{Error, Result};

/// Base ID reported by the simulated gateway
pub const SIM_BASE_ADDRESS: DeviceAddress = DeviceAddress::from_bytes([0xFF, 0x80, 0x12, 0x80]);

#[derive(Debug)]
struct SimDevice {
    eep: EepId,
    address: DeviceAddress,
    values: HashMap<String, Value>,
}

#[derive(Debug)]
struct Skew {
    payload: [u8; 4],
    field: String,
    codes: i64,
    remaining: usize,
}

#[derive(Debug, Default)]
struct SimState {
    base_address: DeviceAddress,
    incoming: VecDeque<u8>,
    sent: Vec<Vec<u8>>,
    devices: HashMap<u64, SimDevice>,
    next_id: u64,
    deleted: Vec<DeviceId>,
    drops: Vec<([u8; 4], usize)>,
    skews: Vec<Skew>,
    pinned: HashMap<String, Value>,
    actuators_muted: bool,
    fail_deletes: bool,
}

fn status_profile(eep: EepId) -> Option<&'static Profile> {
    if eep == A53802_STATUS.eep {
        return Some(&A53802_STATUS);
    }
    find(eep).ok()
}

impl SimState {
    fn queue(&mut self, packet: &Packet) {
        if let Ok(frame) = packet.encode() {
            self.incoming.extend(frame);
        }
    }

    fn on_frame(&mut self, frame: &[u8]) {
        let Ok(packet) = Packet::decode(frame) else {
            return;
        };
        if packet.packet_type == PacketType::COMMON_COMMAND && packet.data == [CO_RD_IDBASE] {
            let mut data = vec![RET_OK];
            data.extend_from_slice(self.base_address.as_bytes());
            self.queue(&Packet::new(PacketType::RESPONSE, data, vec![0x0A]));
            return;
        }
        if let Ok(telegram) = Erp1Telegram::from_packet(&packet) {
            if let Some(payload) = telegram.four_bs_payload() {
                self.on_telegram(telegram.sender, payload);
            }
        }
    }

    fn on_telegram(&mut self, sender: DeviceAddress, payload: [u8; 4]) {
        if let Some(rule) = self.drops.iter_mut().find(|d| d.0 == payload && d.1 > 0) {
            rule.1 -= 1;
            return;
        }

        for device in self.devices.values_mut() {
            if device.address != sender {
                continue;
            }
            let Some(profile) = status_profile(device.eep) else {
                continue;
            };
            let Ok(Decoded::Data(readings)) = EepCodec::new(profile).decode(&payload) else {
                continue;
            };
            for reading in readings {
                let mut value = reading.value;
                if let Some(skew) = self
                    .skews
                    .iter_mut()
                    .find(|s| s.payload == payload && s.field == reading.field && s.remaining > 0)
                {
                    skew.remaining -= 1;
                    if let Ok(field) = profile.field(reading.field) {
                        value += skew.codes as f64 * field.resolution();
                    }
                }
                device
                    .values
                    .insert(reading.field.to_string(), Value::Float(value));
            }
        }
    }

    /// Telegram an actuator transmits after one of its values was written.
    fn actuator_reply(&mut self, id: u64, name: &str) {
        if self.actuators_muted {
            return;
        }
        let Some(device) = self.devices.get(&id) else {
            return;
        };
        let get = |key: &str| device.values.get(key).and_then(Value::as_f64).unwrap_or(0.0);

        let payload = if device.eep == Actuator::Switch.eep() && name == "STATE" {
            [0x01, 0x00, 0x00, if get("STATE") != 0.0 { 0x09 } else { 0x08 }]
        } else if device.eep == Actuator::Dimmer.eep() && name == "LEVEL" {
            let level = get("LEVEL");
            [
                0x02,
                (level * 2.55).round() as u8,
                get("RAMPING_TIME") as u8,
                if level > 0.0 { 0x09 } else { 0x08 },
            ]
        } else {
            return;
        };

        let offset = get("PAIRING") as u8;
        let mut sender = *self.base_address.as_bytes();
        sender[3] = sender[3].wrapping_add(offset);
        let telegram = Erp1Telegram::four_bs(payload, DeviceAddress::from_bytes(sender));
        self.queue(&telegram.to_packet());
    }
}

/// Cloneable handle to one simulated gateway + device management system.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    inner: Rc<RefCell<SimState>>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::with_address(SIM_BASE_ADDRESS)
    }

    pub fn with_address(address: DeviceAddress) -> Self {
        let state = SimState {
            base_address: address,
            next_id: 1,
            ..Default::default()
        };
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    pub fn address(&self) -> DeviceAddress {
        self.inner.borrow().base_address
    }

    /// Gateway bound to the simulated base address, skipping the base-ID
    /// query.
    pub fn bound_gateway(&self, interface: &str) -> Gateway<Bound> {
        Gateway::new(Box::new(self.clone())).bind(Session::new(self.address(), interface))
    }

    /// Ignore the next `times` telegrams carrying exactly `payload`.
    pub fn drop_payload(&self, payload: [u8; 4], times: usize) {
        self.inner.borrow_mut().drops.push((payload, times));
    }

    /// Decode `field` of the next `times` telegrams carrying `payload`
    /// off by `codes` raw codes.
    pub fn skew(&self, payload: [u8; 4], field: &str, codes: i64, times: usize) {
        self.inner.borrow_mut().skews.push(Skew {
            payload,
            field: field.to_string(),
            codes,
            remaining: times,
        });
    }

    /// Always report `value` for variable `name`.
    pub fn pin_value(&self, name: &str, value: Value) {
        self.inner
            .borrow_mut()
            .pinned
            .insert(name.to_string(), value);
    }

    /// Actuators stop transmitting.
    pub fn mute_actuators(&self) {
        self.inner.borrow_mut().actuators_muted = true;
    }

    /// `delete_device` reports an error (the device is removed anyway).
    pub fn fail_deletes(&self) {
        self.inner.borrow_mut().fail_deletes = true;
    }

    /// Queue an arbitrary frame from the gateway.
    pub fn push_frame(&self, frame: &[u8]) {
        self.inner.borrow_mut().incoming.extend(frame.iter().copied());
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().sent.clone()
    }

    pub fn deleted(&self) -> Vec<DeviceId> {
        self.inner.borrow().deleted.clone()
    }

    pub fn live_devices(&self) -> usize {
        self.inner.borrow().devices.len()
    }
}

impl Transport for SimulatedGateway {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.inner.borrow_mut();
        state.sent.push(data.to_vec());
        state.on_frame(data);
        Ok(())
    }

    fn read_byte(&mut self, _timeout_ms: u64) -> Result<u8> {
        self.inner
            .borrow_mut()
            .incoming
            .pop_front()
            .ok_or(Error::Timeout)
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "simulated gateway".to_string()
    }
}

impl DeviceManager for SimulatedGateway {
    fn create_device(
        &mut self,
        eep: EepId,
        address: DeviceAddress,
        _interface: &str,
    ) -> Result<DeviceId> {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.devices.insert(
            id,
            SimDevice {
                eep,
                address,
                values: HashMap::new(),
            },
        );
        Ok(DeviceId::new(id))
    }

    fn delete_device(&mut self, id: DeviceId) -> Result<()> {
        let mut state = self.inner.borrow_mut();
        if state.devices.remove(&id.as_u64()).is_none() {
            return Err(Error::Proxy(format!("unknown peer {}", id)));
        }
        state.deleted.push(id);
        if state.fail_deletes {
            return Err(Error::Proxy(format!("HomegearException: cannot delete {}", id)));
        }
        Ok(())
    }

    fn get_value(&mut self, id: DeviceId, _channel: i32, name: &str) -> Result<Value> {
        let state = self.inner.borrow();
        let device = state
            .devices
            .get(&id.as_u64())
            .ok_or_else(|| Error::Proxy(format!("unknown peer {}", id)))?;
        if let Some(v) = state.pinned.get(name) {
            return Ok(v.clone());
        }
        Ok(device
            .values
            .get(name)
            .cloned()
            .unwrap_or(Value::Integer(0)))
    }

    fn set_value(&mut self, id: DeviceId, _channel: i32, name: &str, value: Value) -> Result<()> {
        let mut state = self.inner.borrow_mut();
        let device = state
            .devices
            .get_mut(&id.as_u64())
            .ok_or_else(|| Error::Proxy(format!("unknown peer {}", id)))?;
        device.values.insert(name.to_string(), value);
        state.actuator_reply(id.as_u64(), name);
        Ok(())
    }
}
