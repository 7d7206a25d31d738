//! Configuration-driven household session.

use std::time::Duration;

use crate::config::{
    HomeConfig, LightBulbConfig, SimulationConfig, SmartOutletConfig, ThermostatConfig,
};
use crate::devices::{Device, LightBulb, SmartOutlet, Thermostat, VoltageJitter};
use crate::error::DeviceError;

use super::context::HomeContext;
use super::home::Home;
use super::report::HomeReport;

/// Everything observed during one household session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Snapshot taken just before the devices were switched off.
    pub during: HomeReport,
    /// Snapshot taken after every device was switched off.
    pub after: HomeReport,
    /// One voltage reading per sensor-capable device, taken at session start.
    pub sensor_readings: Vec<(String, f64)>,
    /// Status line of every device while it was running.
    pub statuses: Vec<String>,
}

/// Runs one household session.
///
/// Every configured device is built and switched on, thermostat targets and
/// modes and outlet relay states are applied, sensors are sampled once, then
/// `session_seconds` pass on the context clock and all devices are switched
/// off again.
///
/// # Errors
///
/// Returns a [`DeviceError`] if a device cannot be constructed or a
/// configured thermostat mode is not recognized.
pub fn run_session(
    cfg: &HomeConfig,
    ctx: &mut HomeContext,
) -> Result<SessionOutcome, DeviceError> {
    tracing::info!(
        devices = cfg.device_count(),
        session_seconds = cfg.simulation.session_seconds,
        "starting household session"
    );

    let mut home = Home::new();

    for lb in &cfg.light_bulb {
        let mut bulb = light_bulb(lb, ctx)?;
        bulb.turn_on(ctx);
        home.add(bulb);
    }

    for th in &cfg.thermostat {
        let mut t = thermostat(th, ctx)?;
        t.turn_on(ctx);
        if let Some(target) = th.target_temp_c {
            t.set_target_temperature(ctx, target);
        }
        if let Some(mode) = &th.mode {
            t.set_mode(ctx, mode)?;
        }
        home.add(t);
    }

    for (i, so) in cfg.smart_outlet.iter().enumerate() {
        let mut outlet = smart_outlet(so, i, &cfg.simulation, ctx)?;
        outlet.turn_on(ctx);
        if outlet.is_engaged() != so.engaged {
            outlet.toggle_outlet();
        }
        home.add(outlet);
    }

    let sensor_readings = home.sensor_readings();
    let statuses = home.statuses();

    ctx.wait(Duration::from_secs(cfg.simulation.session_seconds));
    let during = home.report(ctx);

    home.turn_all_off(ctx);
    let after = home.report(ctx);

    tracing::info!(
        energy_wh = after.booked_energy_wh,
        devices_created = after.devices_created,
        "household session finished"
    );

    Ok(SessionOutcome {
        during,
        after,
        sensor_readings,
        statuses,
    })
}

fn light_bulb(cfg: &LightBulbConfig, ctx: &mut HomeContext) -> Result<LightBulb, DeviceError> {
    LightBulb::new(
        ctx,
        &cfg.id,
        &cfg.name,
        cfg.rated_watts,
        cfg.brightness,
        &cfg.color,
    )
}

fn thermostat(cfg: &ThermostatConfig, ctx: &mut HomeContext) -> Result<Thermostat, DeviceError> {
    Thermostat::new(ctx, &cfg.id, &cfg.name, cfg.rated_watts, cfg.initial_temp_c)
}

/// Each outlet gets its own jitter stream derived from the master seed.
fn smart_outlet(
    cfg: &SmartOutletConfig,
    index: usize,
    sim: &SimulationConfig,
    ctx: &mut HomeContext,
) -> Result<SmartOutlet, DeviceError> {
    let jitter = if sim.voltage_jitter {
        VoltageJitter::seeded(sim.seed.wrapping_add(index as u64))
    } else {
        VoltageJitter::Flat
    };
    Ok(SmartOutlet::new(ctx, &cfg.id, &cfg.name, cfg.rated_watts, cfg.max_current_a)?
        .with_jitter(jitter))
}
