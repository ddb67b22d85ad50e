use tracing::{debug, warn};

use crate::error::{ResolutionError, TransportError};
use crate::record::{ReductionPolicy, Timings};
use crate::transport::Transport;

use super::detail::{detail_path_from_href, first_item_href};
use super::timed::{CallKind, timed_call};

/// How each endpoint is sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatPlan {
    /// Timed calls per endpoint.
    pub iterations: usize,
    /// Calls issued and discarded before the timed ones.
    pub warmup_calls: usize,
    pub policy: ReductionPolicy,
    /// Path segment that detail hrefs are split on.
    pub root_segment: String,
}

/// What one `run_*` operation measured for an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub timings: Timings,
    pub count: Option<u64>,
    /// Resolved detail path; `None` outside detail mode or when resolution failed.
    pub detail_path: Option<String>,
}

/// Repeats timed calls against one endpoint at a time.
pub struct CallRepeater<'run, T: ?Sized> {
    transport: &'run T,
    plan: &'run RepeatPlan,
}

impl<'run, T> CallRepeater<'run, T>
where
    T: Transport + ?Sized,
{
    #[must_use]
    pub const fn new(transport: &'run T, plan: &'run RepeatPlan) -> Self {
        Self { transport, plan }
    }

    /// Times `iterations` GETs of the endpoint, then reads its `count`.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure; no samples are kept in that case.
    pub async fn run_list(&self, endpoint: &str) -> Result<Measurement, TransportError> {
        let times = self.sample(endpoint, CallKind::ListGet).await?;
        let count = self.fetch_count(endpoint).await?;
        Ok(Measurement {
            timings: Timings::from_samples(self.plan.policy, times),
            count,
            detail_path: None,
        })
    }

    /// Resolves the first listed resource and times `iterations` GETs of it.
    ///
    /// A list without a usable first item is not an error: the measurement
    /// then has empty timings, while `count` still comes from the list.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure.
    pub async fn run_detail(&self, endpoint: &str) -> Result<Measurement, TransportError> {
        let listing = timed_call(self.transport, endpoint, CallKind::ListGet).await?;
        let resolved = listing
            .body
            .as_ref()
            .map_or_else(
                || {
                    Err(ResolutionError::NoItems {
                        endpoint: endpoint.to_owned(),
                    })
                },
                |body| first_item_href(body, endpoint),
            )
            .and_then(|href| detail_path_from_href(href, &self.plan.root_segment));

        let (timings, detail_path) = match resolved {
            Ok(path) => {
                debug!(
                    "Issuing {} detail calls: GET {}",
                    self.plan.iterations, path
                );
                let times = self.sample(&path, CallKind::ListGet).await?;
                (Timings::from_samples(self.plan.policy, times), Some(path))
            }
            Err(reason) => {
                warn!("Skipping detail calls for {}: {}", endpoint, reason);
                (Timings::empty(self.plan.policy), None)
            }
        };

        let count = self.fetch_count(endpoint).await?;
        Ok(Measurement {
            timings,
            count,
            detail_path,
        })
    }

    /// Times `iterations` HEADs of the endpoint. `count` is always 1.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure.
    pub async fn run_head(&self, endpoint: &str) -> Result<Measurement, TransportError> {
        let times = self.sample(endpoint, CallKind::Head).await?;
        Ok(Measurement {
            timings: Timings::from_samples(self.plan.policy, times),
            count: Some(1),
            detail_path: None,
        })
    }

    async fn sample(&self, endpoint: &str, kind: CallKind) -> Result<Vec<f64>, TransportError> {
        for _ in 0..self.plan.warmup_calls {
            timed_call(self.transport, endpoint, kind).await?;
        }
        let mut times = Vec::new();
        for _ in 0..self.plan.iterations {
            let sample = timed_call(self.transport, endpoint, kind).await?;
            times.push(sample.seconds());
        }
        Ok(times)
    }

    async fn fetch_count(&self, endpoint: &str) -> Result<Option<u64>, TransportError> {
        let sample = timed_call(self.transport, endpoint, CallKind::ListGet).await?;
        Ok(sample
            .body
            .as_ref()
            .and_then(|body| body.get("count"))
            .and_then(serde_json::Value::as_u64))
    }
}
