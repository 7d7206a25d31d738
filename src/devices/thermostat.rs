use std::fmt;
use std::str::FromStr;

use crate::devices::light_bulb::on_off;
use crate::devices::power::PowerUnit;
use crate::devices::types::Device;
use crate::error::{ArgumentError, DeviceError};
use crate::sim::context::HomeContext;

/// Default starting temperature in °C.
pub const DEFAULT_INITIAL_TEMP_C: f64 = 20.0;

/// Operating mode of a [`Thermostat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThermostatMode {
    #[default]
    Off,
    Heating,
    Cooling,
}

impl ThermostatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heating => "heating",
            Self::Cooling => "cooling",
        }
    }
}

impl FromStr for ThermostatMode {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "heating" => Ok(Self::Heating),
            "cooling" => Ok(Self::Cooling),
            other => Err(ArgumentError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heating/cooling thermostat whose draw scales with the temperature gap.
///
/// Mode transitions:
/// - `turn_on` moves `off` to `heating`
/// - `turn_off` always ends in `off`
/// - `set_mode` to `heating`/`cooling` turns a switched-off device on
#[derive(Debug)]
pub struct Thermostat {
    power: PowerUnit,
    current_temp_c: f64,
    target_temp_c: f64,
    mode: ThermostatMode,
}

impl Thermostat {
    /// Creates a switched-off thermostat whose target equals `initial_temp_c`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidConfiguration`] for a non-positive `rated_watts`.
    pub fn new(
        ctx: &mut HomeContext,
        id: impl Into<String>,
        name: impl Into<String>,
        rated_watts: f64,
        initial_temp_c: f64,
    ) -> Result<Self, DeviceError> {
        let power = PowerUnit::new(ctx, id, name, rated_watts)?;
        Ok(Self {
            power,
            current_temp_c: initial_temp_c,
            target_temp_c: initial_temp_c,
            mode: ThermostatMode::Off,
        })
    }

    /// Copy with a `_copy` identity, same readings and zeroed statistics.
    ///
    /// The copy starts switched off, so its mode is `off`.
    pub fn duplicate(&self, ctx: &mut HomeContext) -> Self {
        Self {
            power: self.power.duplicate(ctx),
            current_temp_c: self.current_temp_c,
            target_temp_c: self.target_temp_c,
            mode: ThermostatMode::Off,
        }
    }

    /// Sets the target temperature, switching the device on if it is off and
    /// the target differs from the current reading.
    pub fn set_target_temperature(&mut self, ctx: &mut HomeContext, temp_c: f64) {
        self.target_temp_c = temp_c;
        if !self.is_on() && temp_c != self.current_temp_c {
            self.turn_on(ctx);
        }
    }

    /// Feeds a new sensor reading.
    pub fn update_temperature(&mut self, temp_c: f64) {
        self.current_temp_c = temp_c;
    }

    /// Sets the mode by name (`"off"`, `"heating"` or `"cooling"`).
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidArgument`] for an unknown name; the mode
    /// and power state are left unchanged.
    pub fn set_mode(&mut self, ctx: &mut HomeContext, mode: &str) -> Result<(), DeviceError> {
        let mode = mode.parse::<ThermostatMode>().inspect_err(|_| {
            tracing::warn!(device_id = self.id(), mode, "rejected thermostat mode");
        })?;
        self.apply_mode(ctx, mode);
        Ok(())
    }

    /// Sets an already-parsed mode. Never fails.
    pub fn apply_mode(&mut self, ctx: &mut HomeContext, mode: ThermostatMode) {
        self.mode = mode;
        if mode != ThermostatMode::Off && !self.is_on() {
            self.turn_on(ctx);
        }
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temp_c
    }

    pub fn target_temperature(&self) -> f64 {
        self.target_temp_c
    }

    pub fn mode(&self) -> ThermostatMode {
        self.mode
    }

    /// Multi-line description including on-time and energy totals.
    pub fn details(&self, ctx: &HomeContext) -> String {
        format!(
            "=== Thermostat ===\n\
             Name: {}\n\
             Status: {}\n\
             Current temperature: {:.1}C\n\
             Target temperature: {:.1}C\n\
             Mode: {}\n\
             Rated power: {} W\n\
             Current draw: {:.1} W\n\
             Total on-time: {}\n\
             Energy used: {:.4} Wh",
            self.name(),
            on_off(self.is_on()),
            self.current_temp_c,
            self.target_temp_c,
            self.mode,
            self.rated_watts(),
            self.current_power_usage(),
            self.power.formatted_on_time(ctx),
            self.total_energy_consumed_wh(ctx),
        )
    }
}

impl Device for Thermostat {
    fn power_unit(&self) -> &PowerUnit {
        &self.power
    }

    fn device_type(&self) -> &'static str {
        "Thermostat"
    }

    /// Switching on from off selects `heating` if no mode is set. A thermostat
    /// that is already on keeps its mode.
    fn turn_on(&mut self, ctx: &mut HomeContext) {
        if self.is_on() {
            return;
        }
        self.power.turn_on(ctx);
        if self.mode == ThermostatMode::Off {
            self.mode = ThermostatMode::Heating;
        }
    }

    fn turn_off(&mut self, ctx: &mut HomeContext) {
        self.power.turn_off(ctx);
        self.mode = ThermostatMode::Off;
    }

    fn status(&self) -> String {
        format!(
            "Thermostat {} {}, current: {:.1}C, target: {:.1}C, mode: {}, rated: {} W",
            self.name(),
            on_off(self.is_on()),
            self.current_temp_c,
            self.target_temp_c,
            self.mode,
            self.rated_watts(),
        )
    }

    fn device_info(&self) -> String {
        format!("{} [Thermostat]", self.power.identity())
    }

    /// Zero when off or in `off` mode; otherwise
    /// `rated_watts * (0.5 + |target - current| / 10)`.
    fn current_power_usage(&self) -> f64 {
        if !self.is_on() || self.mode == ThermostatMode::Off {
            return 0.0;
        }
        let gap = (self.target_temp_c - self.current_temp_c).abs();
        self.rated_watts() * (0.5 + gap / 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermostat(ctx: &mut HomeContext) -> Thermostat {
        Thermostat::new(ctx, "TH1", "Bedroom", 1000.0, 20.0).expect("valid thermostat")
    }

    #[test]
    fn new_thermostat_is_off_in_off_mode() {
        let (mut ctx, _) = HomeContext::manual();
        let th = thermostat(&mut ctx);
        assert!(!th.is_on());
        assert_eq!(th.mode(), ThermostatMode::Off);
        assert_eq!(th.target_temperature(), 20.0);
    }

    #[test]
    fn parses_known_modes_only() {
        assert_eq!("heating".parse::<ThermostatMode>(), Ok(ThermostatMode::Heating));
        assert_eq!("cooling".parse::<ThermostatMode>(), Ok(ThermostatMode::Cooling));
        assert_eq!("off".parse::<ThermostatMode>(), Ok(ThermostatMode::Off));
        assert!("Heating".parse::<ThermostatMode>().is_err());
        assert!("display".parse::<ThermostatMode>().is_err());
    }

    #[test]
    fn invalid_mode_leaves_state_unchanged() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        let err = th.set_mode(&mut ctx, "invalid");
        assert!(matches!(err, Err(DeviceError::InvalidArgument(_))));
        assert_eq!(th.mode(), ThermostatMode::Off);
        assert!(!th.is_on());
    }

    #[test]
    fn heating_mode_turns_device_on() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_mode(&mut ctx, "heating").expect("known mode");
        assert!(th.is_on());
        assert_eq!(th.mode(), ThermostatMode::Heating);
    }

    #[test]
    fn cooling_mode_is_kept_when_turning_on() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_mode(&mut ctx, "cooling").expect("known mode");
        assert_eq!(th.mode(), ThermostatMode::Cooling);
    }

    #[test]
    fn off_mode_does_not_turn_on() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_mode(&mut ctx, "off").expect("known mode");
        assert!(!th.is_on());
    }

    #[test]
    fn turn_on_and_off_drive_mode() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.turn_on(&mut ctx);
        assert_eq!(th.mode(), ThermostatMode::Heating);
        th.turn_off(&mut ctx);
        assert_eq!(th.mode(), ThermostatMode::Off);
    }

    #[test]
    fn redundant_turn_on_keeps_off_mode() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.turn_on(&mut ctx);
        th.set_mode(&mut ctx, "off").expect("known mode");

        th.turn_on(&mut ctx);
        assert!(th.is_on());
        assert_eq!(th.mode(), ThermostatMode::Off);
        assert_eq!(th.current_power_usage(), 0.0);
    }

    #[test]
    fn target_change_turns_on_only_when_different() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_target_temperature(&mut ctx, 20.0);
        assert!(!th.is_on());
        th.set_target_temperature(&mut ctx, 23.0);
        assert!(th.is_on());
        assert_eq!(th.target_temperature(), 23.0);
    }

    #[test]
    fn power_is_zero_when_off_or_mode_off() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_target_temperature(&mut ctx, 25.0);
        th.turn_off(&mut ctx);
        assert_eq!(th.current_power_usage(), 0.0);

        th.turn_on(&mut ctx);
        th.set_mode(&mut ctx, "off").expect("known mode");
        assert!(th.is_on());
        assert_eq!(th.current_power_usage(), 0.0);
    }

    #[test]
    fn power_grows_with_temperature_gap() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.turn_on(&mut ctx);
        assert!((th.current_power_usage() - 500.0).abs() < 1e-9);

        let mut previous = th.current_power_usage();
        for target in [21.0, 22.5, 25.0, 30.0] {
            th.set_target_temperature(&mut ctx, target);
            let usage = th.current_power_usage();
            assert!(usage > previous);
            previous = usage;
        }
        assert!((previous - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn power_is_symmetric_for_cooling() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_mode(&mut ctx, "cooling").expect("known mode");
        th.set_target_temperature(&mut ctx, 15.0);
        assert!((th.current_power_usage() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn status_uses_one_decimal() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.update_temperature(21.25);
        th.set_target_temperature(&mut ctx, 22.0);
        let status = th.status();
        assert!(status.contains("ON"));
        assert!(status.contains("current: 21.2C") || status.contains("current: 21.3C"));
        assert!(status.contains("target: 22.0C"));
        assert!(status.contains("mode: heating"));
        assert!(status.contains("1000 W"));
    }

    #[test]
    fn duplicate_starts_off() {
        let (mut ctx, _) = HomeContext::manual();
        let mut th = thermostat(&mut ctx);
        th.set_mode(&mut ctx, "cooling").expect("known mode");
        let copy = th.duplicate(&mut ctx);
        assert_eq!(copy.id(), "TH1_copy");
        assert!(!copy.is_on());
        assert_eq!(copy.mode(), ThermostatMode::Off);
        assert_eq!(copy.current_temperature(), 20.0);
    }
}
