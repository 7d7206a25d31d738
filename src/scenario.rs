//! Scripted demonstrations of the device model.
//!
//! Each demonstration builds its own devices in the given context and returns
//! the transcript it would print, one line per entry.

use std::fmt;
use std::time::Duration;

use crate::devices::{Device, LightBulb, SmartOutlet, Thermostat};
use crate::error::DeviceError;
use crate::sim::context::HomeContext;
use crate::sim::home::Home;

/// A named demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Create one device of each kind and print info and status.
    Basics,
    /// Drive mixed devices through the common `Device` interface.
    Polymorphism,
    /// Run a timed session and read the home counters.
    Statistics,
    /// Duplicate devices and show that copies are independent.
    Copies,
    /// Use an outlet through its sensor capability.
    Sensor,
    /// Trigger and handle invalid arguments.
    Errors,
    /// Everything above in one walk-through.
    Full,
}

impl Demo {
    pub const ALL: [Demo; 7] = [
        Demo::Basics,
        Demo::Polymorphism,
        Demo::Statistics,
        Demo::Copies,
        Demo::Sensor,
        Demo::Errors,
        Demo::Full,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Basics => "basics",
            Demo::Polymorphism => "polymorphism",
            Demo::Statistics => "statistics",
            Demo::Copies => "copies",
            Demo::Sensor => "sensor",
            Demo::Errors => "errors",
            Demo::Full => "full",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Runs the demonstration and returns its transcript.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] only if one of the fixed demo devices fails
    /// to construct, or a step that is expected to succeed is rejected.
    pub fn run(self, ctx: &mut HomeContext) -> Result<Vec<String>, DeviceError> {
        tracing::debug!(demo = self.name(), "running demonstration");
        let mut out = vec![format!("=== {} ===", self.title())];
        match self {
            Demo::Basics => basics(ctx, &mut out)?,
            Demo::Polymorphism => polymorphism(ctx, &mut out)?,
            Demo::Statistics => statistics(ctx, &mut out)?,
            Demo::Copies => copies(ctx, &mut out)?,
            Demo::Sensor => sensor(ctx, &mut out)?,
            Demo::Errors => errors(ctx, &mut out)?,
            Demo::Full => full(ctx, &mut out)?,
        }
        Ok(out)
    }

    fn title(self) -> &'static str {
        match self {
            Demo::Basics => "Basic operations",
            Demo::Polymorphism => "Polymorphism",
            Demo::Statistics => "Home statistics",
            Demo::Copies => "Copying devices",
            Demo::Sensor => "Sensor capability",
            Demo::Errors => "Error handling",
            Demo::Full => "Full demonstration",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Trio = (LightBulb, Thermostat, SmartOutlet);

fn trio(ctx: &mut HomeContext, suffix: &str, temp_c: f64) -> Result<Trio, DeviceError> {
    Ok((
        LightBulb::new(ctx, format!("LB{suffix}"), "Living room lamp", 60.0, 75, "warm white")?,
        Thermostat::new(ctx, format!("TH{suffix}"), "Bedroom thermostat", 1000.0, temp_c)?,
        SmartOutlet::new(ctx, format!("SO{suffix}"), "Hallway outlet", 5.0, 16.0)?,
    ))
}

fn basics(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let (lamp, thermo, outlet) = trio(ctx, "1", 22.5)?;
    out.push(format!("1. {}", lamp.device_info()));
    out.push(format!("2. {}", thermo.device_info()));
    out.push(format!("3. {}", outlet.device_info()));
    out.push(format!("Devices created so far: {}", ctx.devices_created()));
    out.push(lamp.status());
    out.push(thermo.status());
    out.push(outlet.status());
    Ok(())
}

fn polymorphism(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let (lamp, thermo, outlet) = trio(ctx, "1", 22.0)?;
    let mut home = Home::new();
    home.add(lamp);
    home.add(thermo);
    home.add(outlet);

    out.push("Turning everything on through the Device interface:".to_string());
    home.turn_all_on(ctx);
    out.extend(home.statuses());

    out.push("Turning everything off:".to_string());
    home.turn_all_off(ctx);
    out.extend(home.statuses());
    Ok(())
}

fn statistics(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    ctx.reset_energy_counter();
    let (lamp, thermo, outlet) = trio(ctx, "_STAT", 21.0)?;
    let mut home = Home::new();
    home.add(lamp);
    home.add(thermo);
    home.add(outlet);

    home.turn_all_on(ctx);
    ctx.wait(Duration::from_secs(1));
    home.turn_all_off(ctx);

    out.push(format!("Devices created: {}", ctx.devices_created()));
    out.push(format!("Energy consumed: {:.4} Wh", ctx.total_energy_wh()));
    Ok(())
}

fn copies(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let (mut lamp, thermo, outlet) = trio(ctx, "1", 22.5)?;
    let mut lamp_copy = lamp.duplicate(ctx);
    let thermo_copy = thermo.duplicate(ctx);
    let outlet_copy = outlet.duplicate(ctx);

    lamp.turn_on(ctx);
    lamp_copy.turn_off(ctx);
    lamp.set_brightness(100)?;
    lamp_copy.set_brightness(50)?;

    out.push(format!("Original lamp: {}", lamp.status()));
    out.push(format!("Copied lamp:   {}", lamp_copy.status()));
    out.push(format!("Original ids: {}, {}, {}", lamp.id(), thermo.id(), outlet.id()));
    out.push(format!(
        "Copied ids:   {}, {}, {}",
        lamp_copy.id(),
        thermo_copy.id(),
        outlet_copy.id()
    ));
    Ok(())
}

fn sensor(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let mut outlet = SmartOutlet::new(ctx, "SO_SENSE", "Outlet with sensor", 5.0, 16.0)?;
    outlet.turn_on(ctx);
    out.push(format!("As a device: {}", outlet.status()));

    let device: &mut dyn Device = &mut outlet;
    if let Some(sensor) = device.as_sensor_mut() {
        out.push(format!("As a sensor: {}", sensor.sensor_type()));
        out.push(format!("  voltage: {:.1} V", sensor.current_voltage()));
        out.push(format!("  power:   {:.1} W", sensor.current_power()));
    }
    Ok(())
}

fn errors(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let mut lamp = LightBulb::new(ctx, "LB_EX", "Test lamp", 60.0, 50, "white")?;
    let mut thermo = Thermostat::new(ctx, "TH_EX", "Test thermostat", 1000.0, 22.0)?;

    match lamp.set_brightness(150) {
        Ok(()) => out.push("brightness 150: accepted (unexpected)".to_string()),
        Err(e) => out.push(format!("brightness 150: rejected: {e}")),
    }
    match thermo.set_mode(ctx, "unknown") {
        Ok(()) => out.push("mode \"unknown\": accepted (unexpected)".to_string()),
        Err(e) => out.push(format!("mode \"unknown\": rejected: {e}")),
    }
    match LightBulb::new(ctx, "LB_BAD", "Broken lamp", 0.0, 50, "white") {
        Ok(_) => out.push("0 W bulb: accepted (unexpected)".to_string()),
        Err(e) => out.push(format!("0 W bulb: rejected: {e}")),
    }

    lamp.set_brightness(80)?;
    thermo.set_mode(ctx, "cooling")?;
    out.push(format!("valid values accepted: {} / {}", lamp.status(), thermo.status()));
    Ok(())
}

fn full(ctx: &mut HomeContext, out: &mut Vec<String>) -> Result<(), DeviceError> {
    let mut lamp = LightBulb::new(ctx, "LB_FULL", "Best lamp", 60.0, 85, "warm white")?;
    let mut thermo = Thermostat::new(ctx, "TH_FULL", "Smart thermostat", 1000.0, 23.5)?;
    let mut outlet = SmartOutlet::new(ctx, "SO_FULL", "Smart outlet", 5.0, 16.0)?;

    out.push("--- Part 1: devices ---".to_string());
    out.push(lamp.device_info());
    out.push(thermo.device_info());
    out.push(outlet.device_info());

    out.push("--- Part 2: switching on ---".to_string());
    lamp.turn_on(ctx);
    thermo.turn_on(ctx);
    thermo.set_target_temperature(ctx, 25.0);
    thermo.set_mode(ctx, "heating")?;
    outlet.turn_on(ctx);
    out.push(lamp.status());
    out.push(thermo.status());
    out.push(outlet.status());

    out.push("--- Part 3: changing settings ---".to_string());
    lamp.set_brightness(95)?;
    lamp.set_color("light blue");
    thermo.update_temperature(24.0);
    out.push(format!(
        "Lamp: brightness {}%, color {}",
        lamp.brightness(),
        lamp.color()
    ));
    out.push(format!(
        "Thermostat: current {:.1}C, draw {:.1} W",
        thermo.current_temperature(),
        thermo.current_power_usage()
    ));

    ctx.wait(Duration::from_secs(90));

    out.push("--- Part 4: details ---".to_string());
    out.extend(lamp.details(ctx).lines().map(str::to_string));
    out.extend(thermo.details(ctx).lines().map(str::to_string));
    out.extend(outlet.details(ctx).lines().map(str::to_string));

    out.push("--- Part 5: switching off ---".to_string());
    lamp.turn_off(ctx);
    thermo.turn_off(ctx);
    outlet.turn_off(ctx);
    out.push(format!("Devices created: {}", ctx.devices_created()));
    out.push(format!("Energy consumed: {:.4} Wh", ctx.total_energy_wh()));
    Ok(())
}
