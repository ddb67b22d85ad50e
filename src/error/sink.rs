use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("No results to flatten into a row.")]
    EmptyResults,
    #[error("Failed to create export directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to inspect export file '{path}': {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Transient failure appending to '{target}': {source}")]
    Transient {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Giving up on '{target}' after {attempts} attempts: {source}")]
    RetriesExhausted {
        target: String,
        attempts: u32,
        #[source]
        source: Box<SinkError>,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl SinkError {
    /// Whether a retry of the same append may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, SinkError::Transient { .. })
    }
}
