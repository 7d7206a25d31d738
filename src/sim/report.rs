//! Post-hoc statistics for a home and its devices.

use std::fmt;

use crate::devices::Device;

use super::context::{HomeContext, HomeStats};

/// Statistics for one device at the moment of the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport {
    pub id: String,
    pub name: String,
    pub device_type: &'static str,
    pub on: bool,
    /// Rated power (W).
    pub rated_watts: f64,
    /// Total on-time including the running session (s).
    pub on_seconds: f64,
    /// Energy used including the running session (Wh).
    pub energy_wh: f64,
    /// Instantaneous draw (W).
    pub current_power_w: f64,
}

impl DeviceReport {
    pub fn from_device(device: &dyn Device, ctx: &HomeContext) -> Self {
        let unit = device.power_unit();
        Self {
            id: device.id().to_string(),
            name: device.name().to_string(),
            device_type: device.device_type(),
            on: device.is_on(),
            rated_watts: device.rated_watts(),
            on_seconds: unit.total_on_time(ctx).as_secs_f64(),
            energy_wh: device.total_energy_consumed_wh(ctx),
            current_power_w: device.current_power_usage(),
        }
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:<24} {:<11} {:<3} | rated={:>7.1} W  now={:>7.1} W  \
             on={:>8.1} s  energy={:>9.4} Wh",
            self.id,
            self.name,
            self.device_type,
            if self.on { "ON" } else { "OFF" },
            self.rated_watts,
            self.current_power_w,
            self.on_seconds,
            self.energy_wh,
        )
    }
}

/// Snapshot of a whole home.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeReport {
    pub devices: Vec<DeviceReport>,
    /// Devices created in this run, including ones no longer in the home.
    pub devices_created: u64,
    /// Energy booked by completed sessions of all devices (Wh).
    pub booked_energy_wh: f64,
    /// Sum of per-device energy including running sessions (Wh).
    pub fleet_energy_wh: f64,
    /// Sum of instantaneous draws (W).
    pub current_power_w: f64,
}

impl HomeReport {
    pub fn new(devices: Vec<DeviceReport>, stats: HomeStats) -> Self {
        let fleet_energy_wh = devices.iter().map(|d| d.energy_wh).sum();
        let current_power_w = devices.iter().map(|d| d.current_power_w).sum();
        Self {
            devices,
            devices_created: stats.devices_created,
            booked_energy_wh: stats.energy_consumed_wh,
            fleet_energy_wh,
            current_power_w,
        }
    }

    /// Number of devices currently switched on.
    pub fn devices_on(&self) -> usize {
        self.devices.iter().filter(|d| d.on).count()
    }
}

impl fmt::Display for HomeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Home Report ---")?;
        for d in &self.devices {
            writeln!(f, "{d}")?;
        }
        writeln!(
            f,
            "Devices in home:        {} ({} on)",
            self.devices.len(),
            self.devices_on()
        )?;
        writeln!(f, "Devices created:        {}", self.devices_created)?;
        writeln!(f, "Current draw:           {:.2} W", self.current_power_w)?;
        writeln!(f, "Fleet energy:           {:.4} Wh", self.fleet_energy_wh)?;
        write!(f, "Booked energy (total):  {:.4} Wh", self.booked_energy_wh)
    }
}
