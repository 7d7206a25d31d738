use std::fmt;

use crate::devices::power::PowerUnit;
use crate::devices::types::Device;
use crate::error::{ArgumentError, DeviceError};
use crate::sim::context::HomeContext;

/// Default colour of a new bulb.
pub const DEFAULT_COLOR: &str = "warm white";

/// Brightness level as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use smart_home_sim::devices::Brightness;
///
/// let level = Brightness::try_from(75_i64).unwrap();
/// assert_eq!(level.value(), 75);
/// assert!(Brightness::try_from(101_i64).is_err());
/// assert!(Brightness::try_from(-1_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Brightness {
    type Error = ArgumentError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        match u8::try_from(level) {
            Ok(value) if value <= 100 => Ok(Self(value)),
            _ => Err(ArgumentError::BrightnessOutOfRange { actual: level }),
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A dimmable, coloured light bulb.
///
/// Power draw is the flat rated wattage while on; brightness does not scale it.
#[derive(Debug)]
pub struct LightBulb {
    power: PowerUnit,
    brightness: Brightness,
    color: String,
}

impl LightBulb {
    /// Creates a switched-off bulb.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidConfiguration`] for a non-positive
    /// `rated_watts`, or [`DeviceError::InvalidArgument`] for a brightness
    /// outside 0-100. No device is registered on failure.
    pub fn new(
        ctx: &mut HomeContext,
        id: impl Into<String>,
        name: impl Into<String>,
        rated_watts: f64,
        brightness: i64,
        color: impl Into<String>,
    ) -> Result<Self, DeviceError> {
        let brightness = Brightness::try_from(brightness)?;
        let power = PowerUnit::new(ctx, id, name, rated_watts)?;
        Ok(Self {
            power,
            brightness,
            color: color.into(),
        })
    }

    /// Full-brightness bulb in [`DEFAULT_COLOR`].
    ///
    /// # Errors
    ///
    /// See [`LightBulb::new`].
    pub fn with_defaults(
        ctx: &mut HomeContext,
        id: impl Into<String>,
        name: impl Into<String>,
        rated_watts: f64,
    ) -> Result<Self, DeviceError> {
        Self::new(ctx, id, name, rated_watts, 100, DEFAULT_COLOR)
    }

    /// Copy with a `_copy` identity, same settings and zeroed statistics.
    pub fn duplicate(&self, ctx: &mut HomeContext) -> Self {
        Self {
            power: self.power.duplicate(ctx),
            brightness: self.brightness,
            color: self.color.clone(),
        }
    }

    /// Sets the brightness percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidArgument`] if `level` is outside 0-100;
    /// the previous brightness is kept.
    pub fn set_brightness(&mut self, level: i64) -> Result<(), DeviceError> {
        match Brightness::try_from(level) {
            Ok(brightness) => {
                self.brightness = brightness;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(device_id = self.id(), level, "rejected brightness");
                Err(err.into())
            }
        }
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.value()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Multi-line description including on-time and energy totals.
    pub fn details(&self, ctx: &HomeContext) -> String {
        format!(
            "=== Light bulb ===\n\
             Name: {}\n\
             Status: {}\n\
             Brightness: {}\n\
             Color: {}\n\
             Rated power: {} W\n\
             Total on-time: {}\n\
             Energy used: {:.4} Wh",
            self.name(),
            on_off(self.is_on()),
            self.brightness,
            self.color,
            self.rated_watts(),
            self.power.formatted_on_time(ctx),
            self.total_energy_consumed_wh(ctx),
        )
    }
}

impl Device for LightBulb {
    fn power_unit(&self) -> &PowerUnit {
        &self.power
    }

    fn device_type(&self) -> &'static str {
        "LightBulb"
    }

    fn turn_on(&mut self, ctx: &mut HomeContext) {
        self.power.turn_on(ctx);
    }

    fn turn_off(&mut self, ctx: &mut HomeContext) {
        self.power.turn_off(ctx);
    }

    fn status(&self) -> String {
        format!(
            "Light bulb {} {}, brightness: {}, color: {}, rated: {} W",
            self.name(),
            on_off(self.is_on()),
            self.brightness,
            self.color,
            self.rated_watts(),
        )
    }

    fn device_info(&self) -> String {
        format!("{} [Light bulb]", self.power.identity())
    }
}

pub(crate) fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(ctx: &mut HomeContext) -> LightBulb {
        LightBulb::new(ctx, "LB1", "Lamp", 60.0, 75, "white").expect("valid bulb")
    }

    #[test]
    fn new_bulb_is_off() {
        let (mut ctx, _) = HomeContext::manual();
        let bulb = lamp(&mut ctx);
        assert!(!bulb.is_on());
        assert_eq!(bulb.brightness(), 75);
        assert_eq!(bulb.color(), "white");
    }

    #[test]
    fn constructor_rejects_bad_brightness_without_registering() {
        let (mut ctx, _) = HomeContext::manual();
        let err = LightBulb::new(&mut ctx, "LB1", "Lamp", 60.0, 101, "white");
        assert!(matches!(err, Err(DeviceError::InvalidArgument(_))));
        assert_eq!(ctx.devices_created(), 0);
    }

    #[test]
    fn constructor_rejects_zero_watts() {
        let (mut ctx, _) = HomeContext::manual();
        let err = LightBulb::new(&mut ctx, "LB1", "Lamp", 0.0, 50, "white");
        assert!(matches!(err, Err(DeviceError::InvalidConfiguration(_))));
    }

    #[test]
    fn set_brightness_bounds() {
        let (mut ctx, _) = HomeContext::manual();
        let mut bulb = lamp(&mut ctx);
        for level in [-1, 101] {
            let err = bulb.set_brightness(level);
            assert!(matches!(err, Err(DeviceError::InvalidArgument(_))));
            assert_eq!(bulb.brightness(), 75);
        }
        for level in [0, 42, 100] {
            assert!(bulb.set_brightness(level).is_ok());
            assert_eq!(i64::from(bulb.brightness()), level);
        }
    }

    #[test]
    fn power_is_flat_rated_while_on() {
        let (mut ctx, _) = HomeContext::manual();
        let mut bulb = lamp(&mut ctx);
        assert_eq!(bulb.current_power_usage(), 0.0);
        bulb.turn_on(&mut ctx);
        assert_eq!(bulb.current_power_usage(), 60.0);
        bulb.set_brightness(10).expect("in range");
        assert_eq!(bulb.current_power_usage(), 60.0);
    }

    #[test]
    fn status_reports_state_and_attributes() {
        let (mut ctx, _) = HomeContext::manual();
        let mut bulb = lamp(&mut ctx);
        bulb.turn_on(&mut ctx);
        let status = bulb.status();
        assert!(status.contains("ON"));
        assert!(status.contains("75"));
        assert!(status.contains("white"));
        assert!(status.contains("60 W"));
    }

    #[test]
    fn device_info_tags_variant() {
        let (mut ctx, _) = HomeContext::manual();
        let bulb = lamp(&mut ctx);
        assert_eq!(bulb.device_info(), "Device: Lamp (ID: LB1) [Light bulb]");
    }

    #[test]
    fn duplicate_is_independent() {
        let (mut ctx, _) = HomeContext::manual();
        let mut original = lamp(&mut ctx);
        original.turn_on(&mut ctx);
        let mut copy = original.duplicate(&mut ctx);
        copy.set_brightness(50).expect("in range");
        assert_eq!(copy.id(), "LB1_copy");
        assert!(!copy.is_on());
        assert_eq!(copy.color(), "white");
        assert_eq!(original.brightness(), 75);
        assert_eq!(ctx.devices_created(), 2);
    }

    #[test]
    fn details_include_energy() {
        let (mut ctx, clock) = HomeContext::manual();
        let mut bulb = lamp(&mut ctx);
        bulb.turn_on(&mut ctx);
        clock.advance(std::time::Duration::from_secs(60));
        let details = bulb.details(&ctx);
        assert!(details.contains("Total on-time: 1min 0s"));
        assert!(details.contains("Energy used: 1.0000 Wh"));
    }
}
