use std::time::Duration;

use crate::devices::identity::DeviceIdentity;
use crate::error::{ConfigurationError, DeviceError};
use crate::sim::context::HomeContext;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Power accounting shared by every device: rated wattage plus on-time tracking.
///
/// Energy is `rated_watts * hours_on`, in watt-hours. The accumulated on-time
/// only grows, and only on an on→off transition; the in-progress session is
/// added on top when querying.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smart_home_sim::devices::PowerUnit;
/// use smart_home_sim::sim::context::HomeContext;
///
/// let (mut ctx, clock) = HomeContext::manual();
/// let mut unit = PowerUnit::new(&mut ctx, "H1", "Heater", 1800.0).unwrap();
/// unit.turn_on(&ctx);
/// clock.advance(Duration::from_secs(1800));
/// unit.turn_off(&mut ctx);
/// assert_eq!(unit.energy_consumed_wh(&ctx), 900.0);
/// assert_eq!(ctx.total_energy_wh(), 900.0);
/// ```
#[derive(Debug)]
pub struct PowerUnit {
    identity: DeviceIdentity,
    rated_watts: f64,
    last_on_at: Option<Duration>,
    accumulated_on: Duration,
}

impl PowerUnit {
    /// Creates a switched-off unit and registers it with the context.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidConfiguration`] if `rated_watts` is not a
    /// finite value greater than zero. Nothing is registered in that case.
    pub fn new(
        ctx: &mut HomeContext,
        id: impl Into<String>,
        name: impl Into<String>,
        rated_watts: f64,
    ) -> Result<Self, DeviceError> {
        validate_rated_watts(rated_watts)?;
        let identity = DeviceIdentity::new(id, name);
        ctx.register_device(identity.id());
        Ok(Self::from_parts(identity, rated_watts))
    }

    /// Copy with a fresh identity and zeroed timing statistics.
    pub(crate) fn duplicate(&self, ctx: &mut HomeContext) -> Self {
        let identity = DeviceIdentity::copy_of(&self.identity);
        ctx.register_device(identity.id());
        Self::from_parts(identity, self.rated_watts)
    }

    fn from_parts(identity: DeviceIdentity, rated_watts: f64) -> Self {
        Self {
            identity,
            rated_watts,
            last_on_at: None,
            accumulated_on: Duration::ZERO,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn is_on(&self) -> bool {
        self.identity.is_on()
    }

    pub fn rated_watts(&self) -> f64 {
        self.rated_watts
    }

    /// Starts an on-session. No-op if already on.
    pub fn turn_on(&mut self, ctx: &HomeContext) {
        if self.is_on() {
            return;
        }
        let now = ctx.now();
        self.last_on_at = Some(now);
        self.identity.set_on(true);
        tracing::debug!(device_id = self.identity.id(), at = ?now, "turned on");
    }

    /// Ends the on-session, booking its duration and energy. No-op if already off.
    pub fn turn_off(&mut self, ctx: &mut HomeContext) {
        if !self.is_on() {
            return;
        }
        let elapsed = self.session_time(ctx);
        self.accumulated_on += elapsed;
        self.last_on_at = None;
        self.identity.set_on(false);

        let energy_wh = self.energy_for(elapsed);
        ctx.record_energy(self.identity.id(), energy_wh);
        tracing::debug!(
            device_id = self.identity.id(),
            elapsed = ?elapsed,
            energy_wh,
            "turned off"
        );
    }

    /// Rated wattage while on, zero while off.
    pub fn base_power_usage(&self) -> f64 {
        if self.is_on() { self.rated_watts } else { 0.0 }
    }

    /// On-time booked by completed sessions.
    pub fn accumulated_on_time(&self) -> Duration {
        self.accumulated_on
    }

    /// Length of the in-progress session, zero when off.
    pub fn session_time(&self, ctx: &HomeContext) -> Duration {
        match self.last_on_at {
            Some(since) if self.is_on() => ctx.now().saturating_sub(since),
            _ => Duration::ZERO,
        }
    }

    /// Completed sessions plus the in-progress one.
    pub fn total_on_time(&self, ctx: &HomeContext) -> Duration {
        self.accumulated_on + self.session_time(ctx)
    }

    /// Total on-time in hours.
    pub fn on_time_hours(&self, ctx: &HomeContext) -> f64 {
        self.total_on_time(ctx).as_secs_f64() / SECONDS_PER_HOUR
    }

    /// Energy used by this unit in watt-hours, including the in-progress session.
    pub fn energy_consumed_wh(&self, ctx: &HomeContext) -> f64 {
        self.rated_watts * self.on_time_hours(ctx)
    }

    /// Total on-time as `"1h 2min 3s"`; leading zero units are omitted.
    pub fn formatted_on_time(&self, ctx: &HomeContext) -> String {
        format_duration(self.total_on_time(ctx))
    }

    fn energy_for(&self, on_time: Duration) -> f64 {
        self.rated_watts * on_time.as_secs_f64() / SECONDS_PER_HOUR
    }
}

pub(crate) fn validate_rated_watts(rated_watts: f64) -> Result<(), ConfigurationError> {
    if rated_watts.is_finite() && rated_watts > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositiveRatedPower(rated_watts))
    }
}

fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}min "));
    }
    out.push_str(&format!("{seconds}s"));
    out
}
