//! CSV export for per-device report rows.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::report::DeviceReport;

/// Column header for the device report CSV.
const HEADER: &str = "id,name,device_type,on,rated_watts,on_seconds,energy_wh,current_power_w";

/// Exports device reports to a CSV file at the given path.
///
/// Writes a header row followed by one data row per device, in the order
/// given. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(reports: &[DeviceReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes device reports as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(reports: &[DeviceReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in reports {
        wtr.write_record(&[
            r.id.clone(),
            r.name.clone(),
            r.device_type.to_string(),
            r.on.to_string(),
            format!("{:.2}", r.rated_watts),
            format!("{:.3}", r.on_seconds),
            format!("{:.6}", r.energy_wh),
            format!("{:.4}", r.current_power_w),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
