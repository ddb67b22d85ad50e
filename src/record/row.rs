use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::SinkError;

use super::result::CallModeResult;

/// One scalar cell of a tabular export.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(u64),
    Seconds(f64),
    Empty,
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Seconds(value) => write!(f, "{}", value),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Seconds)
    }
}

impl From<Option<u64>> for CellValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Integer)
    }
}

/// Header and data cells for a single spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub header: Vec<String>,
    pub row: Vec<CellValue>,
}

/// Number of cells emitted per endpoint.
const CELLS_PER_ENDPOINT: usize = 4;

/// Flattens one mode's results into a single row.
///
/// Leading cells are the first result's `date` and `iterations`, followed by
/// `count`, `avg_time`, `min_time` and `max_time` for each endpoint in order.
/// Raw-form results are reduced on the way.
///
/// # Errors
///
/// Returns an error when `results` is empty.
pub fn flatten_to_row(results: &[CallModeResult]) -> Result<TableRow, SinkError> {
    let first = results.first().ok_or(SinkError::EmptyResults)?;
    let width = results
        .len()
        .saturating_mul(CELLS_PER_ENDPOINT)
        .saturating_add(2);

    let mut header = Vec::with_capacity(width);
    let mut row = Vec::with_capacity(width);
    header.push("date".to_owned());
    row.push(CellValue::Text(first.date.clone()));
    header.push("iterations".to_owned());
    row.push(CellValue::Integer(
        u64::try_from(first.iterations).unwrap_or(u64::MAX),
    ));

    for result in results {
        let summary = result.timings.summary();
        header.push(format!("{} count", result.endpoint));
        row.push(CellValue::from(result.count));
        header.push(format!("{} avg_time", result.endpoint));
        row.push(CellValue::from(summary.map(|s| s.avg)));
        header.push(format!("{} min_time", result.endpoint));
        row.push(CellValue::from(summary.map(|s| s.min)));
        header.push(format!("{} max_time", result.endpoint));
        row.push(CellValue::from(summary.map(|s| s.max)));
    }

    Ok(TableRow { header, row })
}
