//! Household device models and their energy accounting.

/// Identity record shared by every device.
pub mod identity;
/// Dimmable light bulb.
pub mod light_bulb;
/// Rated-power and on-time accounting.
pub mod power;
/// Switchable outlet with a voltage sensor.
pub mod smart_outlet;
/// Heating/cooling thermostat.
pub mod thermostat;
pub mod types;

// Re-export the main types for convenience
pub use identity::DeviceIdentity;
pub use light_bulb::{Brightness, LightBulb};
pub use power::PowerUnit;
pub use smart_outlet::SmartOutlet;
pub use thermostat::{Thermostat, ThermostatMode};
pub use types::{Device, Sensor, VoltageJitter};
