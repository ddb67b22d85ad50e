use tracing::info;

use crate::error::TransportError;
use crate::record::{CallMode, CallModeResult, timestamp_now};
use crate::transport::Transport;

use super::repeater::{CallRepeater, Measurement, RepeatPlan};

/// Runs one call mode across an ordered endpoint set.
pub struct EndpointDriver<'run, T: ?Sized> {
    transport: &'run T,
    plan: &'run RepeatPlan,
}

impl<'run, T> EndpointDriver<'run, T>
where
    T: Transport + ?Sized,
{
    #[must_use]
    pub const fn new(transport: &'run T, plan: &'run RepeatPlan) -> Self {
        Self { transport, plan }
    }

    /// Tests every endpoint in order and returns one result per endpoint,
    /// in the same order. Each result is logged as soon as it completes.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure; results logged before it stay in the log.
    pub async fn drive(
        &self,
        endpoints: &[String],
        mode: CallMode,
    ) -> Result<Vec<CallModeResult>, TransportError> {
        let repeater = CallRepeater::new(self.transport, self.plan);
        let mut results = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let date = timestamp_now();
            let measurement = match mode {
                CallMode::List => repeater.run_list(endpoint).await?,
                CallMode::Detail => repeater.run_detail(endpoint).await?,
                CallMode::Head => repeater.run_head(endpoint).await?,
            };
            let result = self.assemble(endpoint, date, measurement);
            info!("[{}] {}", mode, result);
            results.push(result);
        }
        Ok(results)
    }

    fn assemble(&self, endpoint: &str, date: String, measurement: Measurement) -> CallModeResult {
        CallModeResult {
            date,
            source_ip: self.transport.host().to_owned(),
            endpoint: endpoint.to_owned(),
            count: measurement.count,
            timings: measurement.timings,
            iterations: self.plan.iterations,
            detail_path: measurement.detail_path,
        }
    }
}
