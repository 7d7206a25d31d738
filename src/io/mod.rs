/// CSV export of device reports.
pub mod export;
