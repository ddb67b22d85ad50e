//! Tabular export of run results.
mod csv;
mod format;
mod retry;


use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::SinkError;
use crate::record::{CallMode, CellValue, TableRow, flatten_to_row};
use crate::run::TestRun;

pub use csv::CsvFileSink;
pub use retry::RetryingSink;

/// Destination that accepts rows of scalar cells.
#[async_trait]
pub trait TabularSink: Send + Sync {
    /// Human-readable name of the destination, used in errors and logs.
    fn target(&self) -> &str;

    /// Whether the destination holds no rows yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the destination cannot be inspected.
    async fn is_empty(&self) -> Result<bool, SinkError>;

    /// Appends one row.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Transient`] for failures worth retrying.
    async fn append_row(&mut self, cells: &[CellValue]) -> Result<(), SinkError>;
}

/// Where and how run results are exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub dir: PathBuf,
    /// Write the header even when the file already has rows.
    pub include_header: bool,
    pub retries: u32,
    pub retry_delay: Duration,
}

/// Appends `table` to `sink`, preceded by its header when the sink is empty
/// or `include_header` is set.
///
/// # Errors
///
/// Returns an error when the sink cannot be inspected or written.
pub async fn append_table<S>(
    sink: &mut S,
    table: &TableRow,
    include_header: bool,
) -> Result<(), SinkError>
where
    S: TabularSink + ?Sized,
{
    if include_header || sink.is_empty().await? {
        let header: Vec<CellValue> = table
            .header
            .iter()
            .map(|name| CellValue::Text(name.clone()))
            .collect();
        sink.append_row(&header).await?;
    }
    sink.append_row(&table.row).await
}

/// Appends one flattened row per call mode to `<dir>/<mode>.csv`.
///
/// # Errors
///
/// Returns an error when the directory cannot be created, a mode has no
/// results, or a file stays unwritable after the configured retries.
pub async fn export_run(
    settings: &ExportSettings,
    run: &TestRun,
) -> Result<Vec<PathBuf>, SinkError> {
    tokio::fs::create_dir_all(&settings.dir)
        .await
        .map_err(|err| SinkError::CreateDir {
            path: settings.dir.clone(),
            source: err,
        })?;

    let mut written = Vec::with_capacity(CallMode::ALL.len());
    for mode in CallMode::ALL {
        let table = flatten_to_row(run.tests.get(mode))?;
        let path = settings.dir.join(format!("{}.csv", mode.as_str()));
        let mut sink = RetryingSink::new(
            CsvFileSink::new(&path),
            settings.retries,
            settings.retry_delay,
        );
        append_table(&mut sink, &table, settings.include_header).await?;
        info!("Exported {} results to {}", mode, path.display());
        written.push(path);
    }
    Ok(written)
}
