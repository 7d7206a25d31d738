//! TOML-based home configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::ThermostatMode;
use crate::devices::light_bulb::DEFAULT_COLOR;
use crate::devices::smart_outlet::DEFAULT_MAX_CURRENT_A;
use crate::devices::thermostat::DEFAULT_INITIAL_TEMP_C;
use crate::error::ConfigError;

/// Top-level home configuration parsed from TOML.
///
/// Device tables are arrays (`[[light_bulb]]`, `[[thermostat]]`,
/// `[[smart_outlet]]`) and may be omitted. Load with
/// [`HomeConfig::from_toml_file`] or use a preset such as [`HomeConfig::demo`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeConfig {
    /// Session timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub light_bulb: Vec<LightBulbConfig>,
    #[serde(default)]
    pub thermostat: Vec<ThermostatConfig>,
    #[serde(default)]
    pub smart_outlet: Vec<SmartOutletConfig>,
}

/// Session timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seed for sensor jitter.
    pub seed: u64,
    /// How long devices stay on during a session (seconds).
    pub session_seconds: u64,
    /// Time source: `"manual"` (simulated) or `"system"` (wall clock).
    pub clock: String,
    /// Whether outlet sensors perturb their readings.
    pub voltage_jitter: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            session_seconds: 3600,
            clock: "manual".to_string(),
            voltage_jitter: true,
        }
    }
}

/// Light bulb parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightBulbConfig {
    pub id: String,
    pub name: String,
    /// Rated power (W, > 0).
    pub rated_watts: f64,
    /// Brightness percentage (0–100).
    pub brightness: i64,
    pub color: String,
}

impl Default for LightBulbConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            rated_watts: 60.0,
            brightness: 100,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Thermostat parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermostatConfig {
    pub id: String,
    pub name: String,
    /// Rated power (W, > 0).
    pub rated_watts: f64,
    /// Starting temperature reading (°C).
    pub initial_temp_c: f64,
    /// Target applied once the session starts (°C).
    pub target_temp_c: Option<f64>,
    /// Mode applied once the session starts: `"off"`, `"heating"` or `"cooling"`.
    pub mode: Option<String>,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            rated_watts: 1000.0,
            initial_temp_c: DEFAULT_INITIAL_TEMP_C,
            target_temp_c: None,
            mode: None,
        }
    }
}

/// Smart outlet parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmartOutletConfig {
    pub id: String,
    pub name: String,
    /// Rated power of the connected load (W, > 0).
    pub rated_watts: f64,
    /// Current limit (A, > 0).
    pub max_current_a: f64,
    /// Whether the relay stays engaged once the session starts.
    pub engaged: bool,
}

impl Default for SmartOutletConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            rated_watts: 5.0,
            max_current_a: DEFAULT_MAX_CURRENT_A,
            engaged: true,
        }
    }
}

impl HomeConfig {
    /// Three devices, one of each kind.
    pub fn demo() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            light_bulb: vec![LightBulbConfig {
                id: "LB1".into(),
                name: "Living room lamp".into(),
                rated_watts: 60.0,
                brightness: 85,
                ..LightBulbConfig::default()
            }],
            thermostat: vec![ThermostatConfig {
                id: "TH1".into(),
                name: "Bedroom thermostat".into(),
                rated_watts: 1000.0,
                initial_temp_c: 23.5,
                target_temp_c: Some(25.0),
                mode: Some("heating".into()),
            }],
            smart_outlet: vec![SmartOutletConfig {
                id: "SO1".into(),
                name: "Hallway outlet".into(),
                rated_watts: 5.0,
                ..SmartOutletConfig::default()
            }],
        }
    }

    /// A larger flat: several lamps, a cooling thermostat and two outlets.
    pub fn apartment() -> Self {
        let lamp = |id: &str, name: &str, watts: f64, brightness: i64, color: &str| {
            LightBulbConfig {
                id: id.into(),
                name: name.into(),
                rated_watts: watts,
                brightness,
                color: color.into(),
            }
        };
        Self {
            simulation: SimulationConfig {
                session_seconds: 4 * 3600,
                ..SimulationConfig::default()
            },
            light_bulb: vec![
                lamp("LB-K", "Kitchen ceiling", 40.0, 100, "cool white"),
                lamp("LB-L", "Living room lamp", 60.0, 70, DEFAULT_COLOR),
                lamp("LB-B", "Bedside lamp", 9.0, 30, "amber"),
            ],
            thermostat: vec![
                ThermostatConfig {
                    id: "TH-L".into(),
                    name: "Living room AC".into(),
                    rated_watts: 1500.0,
                    initial_temp_c: 27.0,
                    target_temp_c: Some(22.0),
                    mode: Some("cooling".into()),
                },
                ThermostatConfig {
                    id: "TH-B".into(),
                    name: "Bedroom heater".into(),
                    rated_watts: 800.0,
                    initial_temp_c: 19.0,
                    target_temp_c: Some(21.0),
                    mode: None,
                },
            ],
            smart_outlet: vec![
                SmartOutletConfig {
                    id: "SO-TV".into(),
                    name: "TV outlet".into(),
                    rated_watts: 120.0,
                    ..SmartOutletConfig::default()
                },
                SmartOutletConfig {
                    id: "SO-D".into(),
                    name: "Desk outlet".into(),
                    rated_watts: 65.0,
                    max_current_a: 10.0,
                    engaged: false,
                },
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "apartment"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "apartment" => Ok(Self::apartment()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Total number of configured devices.
    pub fn device_count(&self) -> usize {
        self.light_bulb.len() + self.thermostat.len() + self.smart_outlet.len()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.clock != "manual" && s.clock != "system" {
            errors.push(ConfigError::new(
                "simulation.clock",
                format!("must be \"manual\" or \"system\", got \"{}\"", s.clock),
            ));
        }

        for (i, lb) in self.light_bulb.iter().enumerate() {
            let path = format!("light_bulb[{i}]");
            check_identity(&mut errors, &path, &lb.id);
            check_positive(&mut errors, &path, "rated_watts", lb.rated_watts);
            if !(0..=100).contains(&lb.brightness) {
                errors.push(ConfigError::new(
                    format!("{path}.brightness"),
                    "must be in [0, 100]",
                ));
            }
        }

        for (i, th) in self.thermostat.iter().enumerate() {
            let path = format!("thermostat[{i}]");
            check_identity(&mut errors, &path, &th.id);
            check_positive(&mut errors, &path, "rated_watts", th.rated_watts);
            if !th.initial_temp_c.is_finite() {
                errors.push(ConfigError::new(
                    format!("{path}.initial_temp_c"),
                    "must be a finite number",
                ));
            }
            if th.target_temp_c.is_some_and(|t| !t.is_finite()) {
                errors.push(ConfigError::new(
                    format!("{path}.target_temp_c"),
                    "must be a finite number",
                ));
            }
            if let Some(mode) = &th.mode {
                if let Err(e) = mode.parse::<ThermostatMode>() {
                    errors.push(ConfigError::new(format!("{path}.mode"), e.to_string()));
                }
            }
        }

        for (i, so) in self.smart_outlet.iter().enumerate() {
            let path = format!("smart_outlet[{i}]");
            check_identity(&mut errors, &path, &so.id);
            check_positive(&mut errors, &path, "rated_watts", so.rated_watts);
            check_positive(&mut errors, &path, "max_current_a", so.max_current_a);
        }

        errors
    }
}

fn check_identity(errors: &mut Vec<ConfigError>, path: &str, id: &str) {
    if id.trim().is_empty() {
        errors.push(ConfigError::new(format!("{path}.id"), "must not be empty"));
    }
}

fn check_positive(errors: &mut Vec<ConfigError>, path: &str, field: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(format!("{path}.{field}"), "must be > 0"));
    }
}
