//! Device fleet that drives every device of a home through the same calls.

use crate::devices::Device;

use super::context::HomeContext;
use super::report::{DeviceReport, HomeReport};

/// An ordered collection of heterogeneous devices.
///
/// Holds trait objects since the device mix is decided at run time.
#[derive(Default)]
pub struct Home {
    devices: Vec<Box<dyn Device>>,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device. Ids are not checked for uniqueness.
    pub fn add(&mut self, device: impl Device + 'static) {
        self.devices.push(Box::new(device));
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// First device with the given id.
    pub fn get(&self, id: &str) -> Option<&dyn Device> {
        self.devices.iter().find(|d| d.id() == id).map(|d| &**d)
    }

    /// Mutable access to the first device with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Device + 'static)> {
        self.devices
            .iter_mut()
            .find(|d| d.id() == id)
            .map(|d| &mut **d)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Device> {
        self.devices.iter().map(|d| &**d)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Device + 'static)> {
        self.devices.iter_mut().map(|d| &mut **d)
    }

    pub fn turn_all_on(&mut self, ctx: &mut HomeContext) {
        tracing::info!(devices = self.devices.len(), "turning all devices on");
        for device in self.iter_mut() {
            device.turn_on(ctx);
        }
    }

    pub fn turn_all_off(&mut self, ctx: &mut HomeContext) {
        tracing::info!(devices = self.devices.len(), "turning all devices off");
        for device in self.iter_mut() {
            device.turn_off(ctx);
        }
    }

    /// Status line of every device, in insertion order.
    pub fn statuses(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.status()).collect()
    }

    /// Sum of the instantaneous draw of every device in watts.
    pub fn current_power_w(&self) -> f64 {
        self.devices.iter().map(|d| d.current_power_usage()).sum()
    }

    /// One voltage reading from every sensor-capable device as `(id, volts)`.
    pub fn sensor_readings(&mut self) -> Vec<(String, f64)> {
        self.iter_mut()
            .filter_map(|d| {
                let id = d.id().to_string();
                d.as_sensor_mut().map(|s| (id, s.current_voltage()))
            })
            .collect()
    }

    /// Snapshot of per-device and run-wide statistics.
    pub fn report(&self, ctx: &HomeContext) -> HomeReport {
        let devices = self
            .devices
            .iter()
            .map(|d| DeviceReport::from_device(&**d, ctx))
            .collect();
        HomeReport::new(devices, ctx.stats())
    }
}
