//! Smart-home device simulator with per-device power and energy accounting.

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod scenario;
/// Clock, run context, home fleet, reports and the session runner.
pub mod sim;
