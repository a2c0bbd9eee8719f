//! Terminal rendering of the device table

use crate::fetch::DeviceRow;
use anyhow::Result;
use std::fmt::Write;
use tracing::warn;

const MAPS_URL: &str = "https://maps.google.com/maps?q=";

/// Shown when any part of the device fetch fails; partial data is never
/// rendered.
pub const FETCH_FAILED: &str = "Failed to fetch your devices!";

/// Render the outcome of a device fetch: the full table on success, the
/// static failure message on any error. Partial data never reaches the
/// operator.
pub fn render_devices_view(result: Result<Vec<DeviceRow>>) -> String {
    match result {
        Ok(rows) => render_device_table(&rows),
        Err(e) => {
            warn!("Device fetch failed: {}", e);
            format!("{}\n", FETCH_FAILED)
        }
    }
}

pub fn render_device_table(rows: &[DeviceRow]) -> String {
    if rows.is_empty() {
        return "No devices registered.\n".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let marker = if row.first { '*' } else { ' ' };

        let _ = writeln!(
            out,
            "{}[{}] {} (device {})",
            marker, row.index, row.summary.name, row.summary.id
        );
        let _ = writeln!(
            out,
            "    last seen: ({:.4}, {:.4})",
            row.summary.latitude, row.summary.longitude
        );
        let _ = writeln!(
            out,
            "    map: {}{},{}",
            MAPS_URL, row.summary.latitude, row.summary.longitude
        );

        if row.commands.is_empty() {
            let _ = writeln!(out, "    no commands available");
        } else {
            for (i, command) in row.commands.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "    [{}] {} - {}",
                    i, command.name, command.description
                );
            }
        }
    }

    out
}
