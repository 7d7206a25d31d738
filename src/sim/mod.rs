/// Time sources for session accounting.
pub mod clock;
pub mod context;
/// Device fleet operations.
pub mod home;
pub mod report;
pub mod runner;
