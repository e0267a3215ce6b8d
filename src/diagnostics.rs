//! Bench-calibration record: one CSV line per conditioning cycle.
//!
//! ```text
//! speed_interval_us,direction_interval_us,r,raw_speed,raw_direction,smoothed_direction,current_speed,flag
//! ```
//!
//! The cycle driver writes [`HEADER`] once, ahead of the first record.
//! `raw_direction` is left empty when no direction was computed this cycle.
//! Selected with [`OutputMode::Diagnostic`](crate::config::OutputMode).

use core::fmt::Write;

use crate::conditioning::CycleReport;
use crate::error::OutputError;

pub const RECORD_CAPACITY: usize = 128;

pub const HEADER: &str =
    "speed_interval_us,direction_interval_us,r,raw_speed,raw_direction,smoothed_direction,current_speed,flag";

pub type Record = heapless::String<RECORD_CAPACITY>;

/// Format `report` as one CSV record (no line terminator).
pub fn record(report: &CycleReport) -> Result<Record, OutputError> {
    let mut out = Record::new();
    write!(
        out,
        "{},{},{},{},",
        report.speed_interval_us, report.direction_interval_us, report.rate, report.raw_speed
    )
    .map_err(|_| OutputError::Overflow)?;

    if let Some(dir) = report.raw_direction {
        write!(out, "{dir}").map_err(|_| OutputError::Overflow)?;
    }

    write!(
        out,
        ",{},{},{}",
        report.state.smoothed_direction,
        report.state.current_speed,
        report.verdict.as_str()
    )
    .map_err(|_| OutputError::Overflow)?;
    Ok(out)
}
