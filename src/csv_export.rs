//! Tabular export of a snapshot's entries.
//!
//! Fixed 11-column layout, one row per port; `None` fields become empty
//! fields. Values never need more than basic CSV quoting, which is applied
//! when a field carries a comma, quote or newline.

use crate::data_structs::PortEntry;
use crate::error::*;
use std::io::Write;

pub const CSV_HEADERS: [&str; 11] = [
    "port", "crossing",
    "comm_delay", "comm_time", "comm_lane",
    "pass_delay", "pass_time", "pass_lane",
    "ped_delay", "ped_time", "ped_lane"
];

/// Writes the header row plus one row per entry to `out`.
pub fn write_csv<W: Write>(entries: &[PortEntry], mut out: W) -> Result<()> {
    write_row(&mut out, &CSV_HEADERS)?;

    for entry in entries {
        write_row(&mut out, &[
            entry.port.as_str(),
            entry.crossing.as_deref().unwrap_or(""),
            entry.commercial.delay.as_deref().unwrap_or(""),
            entry.commercial.current_time.as_deref().unwrap_or(""),
            entry.commercial.lane_info.as_deref().unwrap_or(""),
            entry.passenger.delay.as_deref().unwrap_or(""),
            entry.passenger.current_time.as_deref().unwrap_or(""),
            entry.passenger.lane_info.as_deref().unwrap_or(""),
            entry.pedestrian.delay.as_deref().unwrap_or(""),
            entry.pedestrian.current_time.as_deref().unwrap_or(""),
            entry.pedestrian.lane_info.as_deref().unwrap_or("")
        ])?;
    }

    Ok(())
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }

        if field.contains(',') || field.contains('"') || field.contains('\n') {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }

    out.write_all(b"\n")?;
    Ok(())
}
