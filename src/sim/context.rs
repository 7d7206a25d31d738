//! Simulation-run context shared by every device in a home.

use std::fmt;
use std::time::Duration;

use super::clock::{Clock, ManualClock, SystemClock};

/// Aggregate counters for one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HomeStats {
    /// Devices constructed (including duplicates) since the context was created.
    pub devices_created: u64,
    /// Energy in watt-hours booked by completed on-sessions of all devices.
    pub energy_consumed_wh: f64,
}

/// Context passed to device constructors and on/off transitions.
///
/// Owns the time source and the run-wide [`HomeStats`]. Its lifetime is one
/// simulation run; nothing here is process-global.
pub struct HomeContext {
    clock: Box<dyn Clock>,
    stats: HomeStats,
}

impl HomeContext {
    /// Creates a context over the given time source with zeroed counters.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            stats: HomeStats::default(),
        }
    }

    /// Creates a context driven by a [`ManualClock`] and returns a handle to it.
    pub fn manual() -> (Self, ManualClock) {
        let clock = ManualClock::new();
        (Self::new(clock.clone()), clock)
    }

    /// Creates a context driven by wall-clock time.
    pub fn system() -> Self {
        Self::new(SystemClock::new())
    }

    /// Current reading of the time source.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Lets `duration` pass on the time source.
    pub fn wait(&self, duration: Duration) {
        self.clock.wait(duration);
    }

    pub fn stats(&self) -> HomeStats {
        self.stats
    }

    pub fn devices_created(&self) -> u64 {
        self.stats.devices_created
    }

    /// Energy in watt-hours booked across all devices so far.
    pub fn total_energy_wh(&self) -> f64 {
        self.stats.energy_consumed_wh
    }

    /// Zeroes the run-wide energy total. Per-device accumulators are untouched.
    pub fn reset_energy_counter(&mut self) {
        tracing::info!(
            previous_wh = self.stats.energy_consumed_wh,
            "resetting home energy counter"
        );
        self.stats.energy_consumed_wh = 0.0;
    }

    pub(crate) fn register_device(&mut self, id: &str) {
        self.stats.devices_created += 1;
        tracing::debug!(
            device_id = id,
            devices_created = self.stats.devices_created,
            "device registered"
        );
    }

    pub(crate) fn record_energy(&mut self, id: &str, energy_wh: f64) {
        self.stats.energy_consumed_wh += energy_wh;
        tracing::debug!(
            device_id = id,
            energy_wh,
            total_wh = self.stats.energy_consumed_wh,
            "energy recorded"
        );
    }
}

impl fmt::Debug for HomeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeContext")
            .field("now", &self.now())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
