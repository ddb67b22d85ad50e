use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::SinkError;
use crate::record::CellValue;

use super::TabularSink;
use super::format::format_record;

/// Appends CSV records to a file, creating it on first use.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
    target: String,
}

impl CsvFileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let target = path.display().to_string();
        Self { path, target }
    }

    fn transient(&self, source: std::io::Error) -> SinkError {
        SinkError::Transient {
            target: self.target.clone(),
            source,
        }
    }
}

#[async_trait]
impl TabularSink for CsvFileSink {
    fn target(&self) -> &str {
        &self.target
    }

    async fn is_empty(&self) -> Result<bool, SinkError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => Ok(metadata.len() == 0),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
            Err(err) => Err(SinkError::Inspect {
                path: self.path.clone(),
                source: err,
            }),
        }
    }

    async fn append_row(&mut self, cells: &[CellValue]) -> Result<(), SinkError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|err| self.transient(err))?;
        file.write_all(format_record(cells).as_bytes())
            .await
            .map_err(|err| self.transient(err))?;
        file.flush().await.map_err(|err| self.transient(err))
    }
}
