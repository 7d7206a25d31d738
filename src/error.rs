//! Error types for device operations and configuration loading.

use thiserror::Error;

/// Errors returned by device constructors and mutators.
///
/// A failed operation never partially applies: the device keeps the state it
/// had before the call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeviceError {
    /// A call argument violated a constraint (brightness range, mode name).
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// Construction parameters describe a device that cannot exist.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
}

/// Argument constraint violations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Brightness outside the 0-100 range.
    #[error("brightness {actual} is out of range [0, 100]")]
    BrightnessOutOfRange {
        /// The value that was provided.
        actual: i64,
    },

    /// Thermostat mode name that is not recognized.
    #[error("unknown thermostat mode \"{0}\", expected \"off\", \"heating\" or \"cooling\"")]
    UnknownMode(String),
}

/// Construction parameter violations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Rated power must be strictly positive and finite.
    #[error("rated power must be > 0 W, got {0}")]
    NonPositiveRatedPower(f64),

    /// Outlet current limit must be strictly positive and finite.
    #[error("maximum current must be > 0 A, got {0}")]
    NonPositiveMaxCurrent(f64),
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"light_bulb[0].brightness"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
