//! Common traits and helpers shared by the device variants.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::devices::power::PowerUnit;
use crate::sim::context::HomeContext;

/// Trait defining a switchable, power-accounted household device.
///
/// Every variant owns a [`PowerUnit`]; the provided methods read identity and
/// accounting data through it, so implementors only supply the
/// variant-specific behavior.
pub trait Device {
    /// The identity and energy-accounting block of this device.
    fn power_unit(&self) -> &PowerUnit;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;

    /// Switches the device on. Calling it while on has no further effect.
    fn turn_on(&mut self, ctx: &mut HomeContext);

    /// Switches the device off, booking the finished session into `ctx`.
    fn turn_off(&mut self, ctx: &mut HomeContext);

    /// One-line human-readable snapshot of the device state.
    fn status(&self) -> String;

    /// Instantaneous power draw in watts.
    fn current_power_usage(&self) -> f64 {
        self.power_unit().base_power_usage()
    }

    /// Identity line, e.g. `Device: Lamp (ID: LB1)`.
    fn device_info(&self) -> String {
        self.power_unit().identity().to_string()
    }

    /// Sensor view of this device, if it has one.
    fn as_sensor(&self) -> Option<&dyn Sensor> {
        None
    }

    /// Mutable sensor view of this device, if it has one.
    fn as_sensor_mut(&mut self) -> Option<&mut dyn Sensor> {
        None
    }

    fn id(&self) -> &str {
        self.power_unit().identity().id()
    }

    fn name(&self) -> &str {
        self.power_unit().identity().name()
    }

    fn is_on(&self) -> bool {
        self.power_unit().is_on()
    }

    fn rated_watts(&self) -> f64 {
        self.power_unit().rated_watts()
    }

    /// Energy in watt-hours used by this device, including the running session.
    fn total_energy_consumed_wh(&self, ctx: &HomeContext) -> f64 {
        self.power_unit().energy_consumed_wh(ctx)
    }
}

/// A device capability exposing a simulated electrical reading.
pub trait Sensor {
    /// Takes a voltage reading in volts. Each call advances the simulated waveform.
    fn current_voltage(&mut self) -> f64;

    /// Power currently flowing through the sensor in watts.
    fn current_power(&self) -> f64;

    /// Descriptive label of the sensing hardware.
    fn sensor_type(&self) -> &'static str;
}

/// Default waveform amplitude in volts.
pub const DEFAULT_JITTER_AMPLITUDE_V: f64 = 2.0;
/// Default uniform noise bound in volts.
pub const DEFAULT_JITTER_NOISE_V: f64 = 0.01;

/// Perturbation model applied to a sensor's nominal voltage.
///
/// Readings stay within `nominal ± (amplitude_v + noise_v)`.
#[derive(Debug, Clone)]
pub enum VoltageJitter {
    /// No perturbation: every reading equals the nominal voltage.
    Flat,
    /// Slow sine wave over the read counter plus seeded uniform noise.
    Waveform {
        amplitude_v: f64,
        noise_v: f64,
        rng: StdRng,
    },
}

impl VoltageJitter {
    /// Waveform jitter with the default amplitude and noise, seeded for reproducibility.
    pub fn seeded(seed: u64) -> Self {
        Self::waveform(DEFAULT_JITTER_AMPLITUDE_V, DEFAULT_JITTER_NOISE_V, seed)
    }

    /// Waveform jitter with explicit bounds. Negative bounds are treated as zero.
    pub fn waveform(amplitude_v: f64, noise_v: f64, seed: u64) -> Self {
        Self::Waveform {
            amplitude_v: amplitude_v.max(0.0),
            noise_v: noise_v.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Same bounds with an independent noise stream derived from this one.
    pub fn forked(&self) -> Self {
        match self {
            Self::Flat => Self::Flat,
            Self::Waveform {
                amplitude_v,
                noise_v,
                rng,
            } => Self::Waveform {
                amplitude_v: *amplitude_v,
                noise_v: *noise_v,
                rng: StdRng::seed_from_u64(rng.clone().random::<u64>()),
            },
        }
    }

    /// Largest absolute offset this model can produce.
    pub fn bound_v(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Waveform {
                amplitude_v,
                noise_v,
                ..
            } => amplitude_v + noise_v,
        }
    }

    /// Offset in volts for the `reading`-th sample.
    pub fn offset_v(&mut self, reading: u64) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Waveform {
                amplitude_v,
                noise_v,
                rng,
            } => {
                let wave = (reading as f64 * 0.1).sin() * *amplitude_v;
                let noise = if *noise_v > 0.0 {
                    rng.random_range(-1.0..=1.0) * *noise_v
                } else {
                    0.0
                };
                wave + noise
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_jitter_is_zero() {
        let mut jitter = VoltageJitter::Flat;
        for n in 0..10 {
            assert_eq!(jitter.offset_v(n), 0.0);
        }
        assert_eq!(jitter.bound_v(), 0.0);
    }

    #[test]
    fn waveform_stays_within_bound() {
        let mut jitter = VoltageJitter::seeded(7);
        let bound = jitter.bound_v();
        for n in 0..1000 {
            assert!(jitter.offset_v(n).abs() <= bound + 1e-12);
        }
    }

    #[test]
    fn waveform_is_deterministic_for_same_seed() {
        let mut a = VoltageJitter::seeded(42);
        let mut b = VoltageJitter::seeded(42);
        for n in 0..50 {
            assert_eq!(a.offset_v(n), b.offset_v(n));
        }
    }

    #[test]
    fn forked_waveform_has_own_noise() {
        let mut original = VoltageJitter::seeded(42);
        let mut fork = original.forked();
        assert_eq!(fork.bound_v(), original.bound_v());
        let diverged = (0..20).any(|n| original.offset_v(n) != fork.offset_v(n));
        assert!(diverged);
        assert!(matches!(VoltageJitter::Flat.forked(), VoltageJitter::Flat));
    }

    #[test]
    fn noiseless_waveform_follows_sine() {
        let mut jitter = VoltageJitter::waveform(2.0, 0.0, 0);
        assert_eq!(jitter.offset_v(0), 0.0);
        let expected = (1.5_f64).sin() * 2.0;
        assert!((jitter.offset_v(15) - expected).abs() < 1e-12);
    }
}
