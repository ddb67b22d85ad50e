use std::time::Duration;

use tokio::time::Instant;

use crate::error::TransportError;
use crate::transport::{RequestMethod, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// GET that must succeed and return a JSON body.
    ListGet,
    /// HEAD whose body is ignored.
    Head,
}

impl CallKind {
    const fn method(self) -> RequestMethod {
        match self {
            CallKind::ListGet => RequestMethod::Get,
            CallKind::Head => RequestMethod::Head,
        }
    }
}

/// One measured call.
#[derive(Debug, Clone)]
pub struct TimedSample {
    pub elapsed: Duration,
    /// Decoded body for [`CallKind::ListGet`], `None` for [`CallKind::Head`].
    pub body: Option<serde_json::Value>,
}

impl TimedSample {
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Issues one request and measures its round trip.
///
/// Only the request/response exchange is timed; status checks and JSON
/// decoding happen after the clock stops.
///
/// # Errors
///
/// Returns an error when the request fails, the status is not 2xx, or a GET
/// body is not valid JSON.
pub async fn timed_call<T>(
    transport: &T,
    endpoint: &str,
    kind: CallKind,
) -> Result<TimedSample, TransportError>
where
    T: Transport + ?Sized,
{
    let start = Instant::now();
    let response = match kind {
        CallKind::ListGet => transport.request(RequestMethod::Get, endpoint).await,
        CallKind::Head => transport.head(endpoint).await,
    };
    let elapsed = start.elapsed();

    let response = response?.error_for_status(kind.method(), endpoint)?;
    let body = match kind {
        CallKind::ListGet => Some(response.json(endpoint)?),
        CallKind::Head => None,
    };
    Ok(TimedSample { elapsed, body })
}
