// eepcheck/src/proxy/homegear.rs
//! `DeviceManager` backed by the Homegear remote console
//! (`homegear -e rc '<script>'`).

use std::process::Command;

use log::{debug, info};

use crate::constants::ENOCEAN_FAMILY_ID;
use crate::proxy::traits::DeviceManager;
use crate::types::{DeviceAddress, DeviceId, EepId, Value};
use crate::{Error, Result};

/// Marker Homegear prints when a script call fails
const EXCEPTION_MARKER: &str = "HomegearException";

pub fn create_device_script(eep: EepId, address: DeviceAddress, interface: &str) -> String {
    format!(
        "print($hg->createDevice({}, (int)hexdec(\"{}\"), \"\", (int){}, 0, \"{}\"));",
        ENOCEAN_FAMILY_ID,
        eep,
        address.as_u32(),
        interface
    )
}

pub fn delete_device_script(id: DeviceId) -> String {
    format!("$hg->deleteDevice((int){}, 0);", id)
}

pub fn get_value_script(id: DeviceId, channel: i32, name: &str) -> String {
    format!("print($hg->getValue((int){}, (int){}, \"{}\"));", id, channel, name)
}

pub fn set_value_script(id: DeviceId, channel: i32, name: &str, value: &Value) -> String {
    let literal = match value {
        Value::Bool(b) => format!("(bool){}", u8::from(*b)),
        Value::Integer(i) => format!("(int){}", i),
        Value::Float(f) => format!("(float){}", f),
        Value::Text(s) => format!("\"{}\"", s),
    };
    format!(
        "$hg->setValue((int){}, (int){}, \"{}\", {});",
        id, channel, name, literal
    )
}

/// Interpret console output: booleans, then integers, then floats; anything
/// else is kept as text.
pub fn parse_value(output: &str) -> Value {
    let s = output.trim();
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(s.to_string())
}

fn check_output(action: &str, output: &str) -> Result<()> {
    if output.contains(EXCEPTION_MARKER) {
        return Err(Error::Proxy(format!("{}: {}", action, output.trim())));
    }
    Ok(())
}

/// Runs every operation as one console invocation.
#[derive(Debug, Clone)]
pub struct HomegearConsole {
    program: String,
}

impl Default for HomegearConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl HomegearConsole {
    pub fn new() -> Self {
        Self {
            program: "homegear".to_string(),
        }
    }

    /// Use another executable, e.g. a wrapper script.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, action: &str, script: &str) -> Result<String> {
        debug!("{} -e rc '{}'", self.program, script);
        let output = Command::new(&self.program)
            .args(["-e", "rc", script])
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        check_output(action, &stdout)?;
        if !output.status.success() {
            return Err(Error::Proxy(format!(
                "{}: {} exited with {}: {}",
                action,
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(stdout)
    }
}

impl DeviceManager for HomegearConsole {
    fn create_device(
        &mut self,
        eep: EepId,
        address: DeviceAddress,
        interface: &str,
    ) -> Result<DeviceId> {
        let out = self.run(
            "create device",
            &create_device_script(eep, address, interface),
        )?;
        let id = match parse_value(&out) {
            Value::Integer(i) if i > 0 => DeviceId::new(i as u64),
            _ => {
                return Err(Error::Proxy(format!(
                    "create device: invalid peer id {:?}",
                    out.trim()
                )));
            }
        };
        info!("created {} device, peer id {}", eep, id);
        Ok(id)
    }

    fn delete_device(&mut self, id: DeviceId) -> Result<()> {
        self.run("delete device", &delete_device_script(id))?;
        info!("removed peer {}", id);
        Ok(())
    }

    fn get_value(&mut self, id: DeviceId, channel: i32, name: &str) -> Result<Value> {
        let out = self.run(
            &format!("get {} on peer {} channel {}", name, id, channel),
            &get_value_script(id, channel, name),
        )?;
        Ok(parse_value(&out))
    }

    fn set_value(&mut self, id: DeviceId, channel: i32, name: &str, value: Value) -> Result<()> {
        self.run(
            &format!("set {} on peer {} channel {}", name, id, channel),
            &set_value_script(id, channel, name, &value),
        )?;
        Ok(())
    }
}
