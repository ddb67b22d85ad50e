//! Per-endpoint result records and the shapes they are exported in.
mod result;
mod row;
mod summary;


pub use result::{CallMode, CallModeResult, ReductionPolicy, Timings};
pub use row::{CellValue, TableRow, flatten_to_row};
pub use summary::LatencySummary;

/// Layout of every timestamp written into results (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
