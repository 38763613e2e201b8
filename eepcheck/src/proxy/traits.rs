// eepcheck/src/proxy/traits.rs

use crate::Result;
use crate::types::{DeviceAddress, DeviceId, EepId, Value};

/// Capability interface of the device management system under test.
///
/// Every operation is synchronous. An error-shaped reply from the system is
/// reported as `Error::Proxy` and ends the run.
pub trait DeviceManager {
    /// Create a device decoding `eep` telegrams sent from `address` through
    /// the named gateway interface.
    fn create_device(
        &mut self,
        eep: EepId,
        address: DeviceAddress,
        interface: &str,
    ) -> Result<DeviceId>;

    fn delete_device(&mut self, id: DeviceId) -> Result<()>;

    fn get_value(&mut self, id: DeviceId, channel: i32, name: &str) -> Result<Value>;

    fn set_value(&mut self, id: DeviceId, channel: i32, name: &str, value: Value) -> Result<()>;

    /// Numeric read used by value comparisons.
    fn get_number(&mut self, id: DeviceId, channel: i32, name: &str) -> Result<f64> {
        let value = self.get_value(id, channel, name)?;
        value.as_f64().ok_or_else(|| {
            crate::Error::Proxy(format!(
                "{} on peer {} channel {} is not numeric: {:?}",
                name, id, channel, value
            ))
        })
    }
}
