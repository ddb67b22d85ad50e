use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::SinkError;
use crate::record::CellValue;

use super::TabularSink;

/// Retries transient append failures a bounded number of times with a fixed delay.
#[derive(Debug)]
pub struct RetryingSink<S> {
    inner: S,
    retries: u32,
    delay: Duration,
}

impl<S: TabularSink> RetryingSink<S> {
    #[must_use]
    pub const fn new(inner: S, retries: u32, delay: Duration) -> Self {
        Self {
            inner,
            retries,
            delay,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: TabularSink> TabularSink for RetryingSink<S> {
    fn target(&self) -> &str {
        self.inner.target()
    }

    async fn is_empty(&self) -> Result<bool, SinkError> {
        self.inner.is_empty().await
    }

    async fn append_row(&mut self, cells: &[CellValue]) -> Result<(), SinkError> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            match self.inner.append_row(cells).await {
                Ok(()) => return Ok(()),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if attempts > self.retries => {
                    return Err(SinkError::RetriesExhausted {
                        target: self.inner.target().to_owned(),
                        attempts,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    warn!(
                        "Append to {} failed ({}); retrying in {:?}",
                        self.inner.target(),
                        err,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}
