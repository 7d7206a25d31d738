use crate::devices::light_bulb::on_off;
use crate::devices::power::PowerUnit;
use crate::devices::types::{Device, Sensor, VoltageJitter};
use crate::error::{ConfigurationError, DeviceError};
use crate::sim::context::HomeContext;

/// Default current limit in amperes.
pub const DEFAULT_MAX_CURRENT_A: f64 = 16.0;
/// Nominal mains voltage in volts.
pub const NOMINAL_VOLTAGE_V: f64 = 220.0;

/// A switchable outlet with a built-in voltage sensor.
///
/// The outlet relay is engaged when the device is turned on and released when
/// it is turned off. Load is drawn only while both the device is on and the
/// relay is engaged.
#[derive(Debug)]
pub struct SmartOutlet {
    power: PowerUnit,
    engaged: bool,
    max_current_a: f64,
    nominal_voltage_v: f64,
    jitter: VoltageJitter,
    readings: u64,
}

impl SmartOutlet {
    /// Creates a switched-off outlet with a flat (unperturbed) voltage sensor.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidConfiguration`] for a non-positive
    /// `rated_watts` or `max_current_a`.
    pub fn new(
        ctx: &mut HomeContext,
        id: impl Into<String>,
        name: impl Into<String>,
        rated_watts: f64,
        max_current_a: f64,
    ) -> Result<Self, DeviceError> {
        if !(max_current_a.is_finite() && max_current_a > 0.0) {
            return Err(ConfigurationError::NonPositiveMaxCurrent(max_current_a).into());
        }
        let power = PowerUnit::new(ctx, id, name, rated_watts)?;
        Ok(Self {
            power,
            engaged: false,
            max_current_a,
            nominal_voltage_v: NOMINAL_VOLTAGE_V,
            jitter: VoltageJitter::Flat,
            readings: 0,
        })
    }

    /// Replaces the sensor perturbation model.
    #[must_use]
    pub fn with_jitter(mut self, jitter: VoltageJitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Copy with a `_copy` identity, same limits and zeroed statistics.
    ///
    /// The copy is switched off with its relay released and its read counter
    /// reset. Its jitter keeps the same bounds on a separate noise stream.
    pub fn duplicate(&self, ctx: &mut HomeContext) -> Self {
        Self {
            power: self.power.duplicate(ctx),
            engaged: false,
            max_current_a: self.max_current_a,
            nominal_voltage_v: self.nominal_voltage_v,
            jitter: self.jitter.forked(),
            readings: 0,
        }
    }

    /// Flips the relay while the device is on and returns the resulting state.
    ///
    /// A switched-off outlet cannot be engaged, so the call is ignored then.
    pub fn toggle_outlet(&mut self) -> bool {
        if self.is_on() {
            self.engaged = !self.engaged;
        } else {
            tracing::debug!(device_id = self.id(), "ignoring toggle while off");
        }
        self.engaged
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn max_current_a(&self) -> f64 {
        self.max_current_a
    }

    pub fn nominal_voltage(&self) -> f64 {
        self.nominal_voltage_v
    }

    /// Number of voltage readings taken so far.
    pub fn readings(&self) -> u64 {
        self.readings
    }

    /// Multi-line description including a fresh voltage reading.
    pub fn details(&mut self, ctx: &HomeContext) -> String {
        let voltage = self.current_voltage();
        format!(
            "=== Smart outlet ===\n\
             Name: {}\n\
             Device status: {}\n\
             Outlet: {}\n\
             Sensor type: {}\n\
             Voltage: {:.1} V\n\
             Max current: {} A\n\
             Rated power: {} W\n\
             Total on-time: {}\n\
             Energy used: {:.4} Wh",
            self.name(),
            on_off(self.is_on()),
            engaged_label(self.engaged),
            self.sensor_type(),
            voltage,
            self.max_current_a,
            self.rated_watts(),
            self.power.formatted_on_time(ctx),
            self.total_energy_consumed_wh(ctx),
        )
    }
}

fn engaged_label(engaged: bool) -> &'static str {
    if engaged { "engaged" } else { "disengaged" }
}

impl Device for SmartOutlet {
    fn power_unit(&self) -> &PowerUnit {
        &self.power
    }

    fn device_type(&self) -> &'static str {
        "SmartOutlet"
    }

    /// Engages the relay on an off to on transition only.
    fn turn_on(&mut self, ctx: &mut HomeContext) {
        if self.is_on() {
            return;
        }
        self.power.turn_on(ctx);
        self.engaged = true;
    }

    fn turn_off(&mut self, ctx: &mut HomeContext) {
        self.power.turn_off(ctx);
        self.engaged = false;
    }

    fn status(&self) -> String {
        format!(
            "Smart outlet {} {}, outlet: {}, max current: {} A, rated: {} W",
            self.name(),
            on_off(self.is_on()),
            engaged_label(self.engaged),
            self.max_current_a,
            self.rated_watts(),
        )
    }

    fn device_info(&self) -> String {
        format!("{} [Smart outlet with sensor]", self.power.identity())
    }

    fn current_power_usage(&self) -> f64 {
        if self.is_on() && self.engaged {
            self.rated_watts()
        } else {
            0.0
        }
    }

    fn as_sensor(&self) -> Option<&dyn Sensor> {
        Some(self)
    }

    fn as_sensor_mut(&mut self) -> Option<&mut dyn Sensor> {
        Some(self)
    }
}

impl Sensor for SmartOutlet {
    fn current_voltage(&mut self) -> f64 {
        let reading = self.readings;
        self.readings += 1;
        self.nominal_voltage_v + self.jitter.offset_v(reading)
    }

    fn current_power(&self) -> f64 {
        self.current_power_usage()
    }

    fn sensor_type(&self) -> &'static str {
        "Voltage sensor"
    }
}
