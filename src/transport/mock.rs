use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

use super::{ApiResponse, RequestMethod, Transport};

/// In-memory appliance for tests.
///
/// Every request sleeps for the next scripted latency (zero once the script
/// runs out), so paused-clock tests observe exact elapsed times.
pub(crate) struct ScriptedTransport {
    host: String,
    version: String,
    bodies: BTreeMap<String, (u16, String)>,
    latencies: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<(RequestMethod, String)>>,
    reject_login: bool,
    reject_logout: bool,
    logged_in: bool,
    logouts: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub(crate) fn new(host: &str) -> Self {
        Self {
            host: host.to_owned(),
            version: "10.0.4.123".to_owned(),
            bodies: BTreeMap::new(),
            latencies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            reject_login: false,
            reject_logout: false,
            logged_in: false,
            logouts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_json(mut self, endpoint: &str, body: serde_json::Value) -> Self {
        self.bodies
            .insert(endpoint.to_owned(), (200, body.to_string()));
        self
    }

    pub(crate) fn with_status(mut self, endpoint: &str, status: u16, body: &str) -> Self {
        self.bodies
            .insert(endpoint.to_owned(), (status, body.to_owned()));
        self
    }

    pub(crate) fn with_latencies(self, seconds: &[u64]) -> Self {
        if let Ok(mut latencies) = self.latencies.lock() {
            latencies.extend(seconds.iter().map(|secs| Duration::from_secs(*secs)));
        }
        self
    }

    pub(crate) fn with_version(mut self, version: &str) -> Self {
        version.clone_into(&mut self.version);
        self
    }

    pub(crate) const fn rejecting_login(mut self) -> Self {
        self.reject_login = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(RequestMethod, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub(crate) const fn rejecting_logout(mut self) -> Self {
        self.reject_logout = true;
        self
    }

    /// Shared logout counter that outlives the transport.
    pub(crate) fn logout_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.logouts)
    }

    fn next_latency(&self) -> Duration {
        self.latencies
            .lock()
            .ok()
            .and_then(|mut latencies| latencies.pop_front())
            .unwrap_or(Duration::ZERO)
    }

    fn record(&self, method: RequestMethod, endpoint: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((method, endpoint.to_owned()));
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn login(&mut self) -> Result<(), TransportError> {
        if self.reject_login {
            return Err(TransportError::LoginRejected {
                host: self.host.clone(),
                status: 401,
            });
        }
        self.logged_in = true;
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), TransportError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.reject_logout {
            return Err(TransportError::Status {
                method: RequestMethod::Delete.as_str(),
                endpoint: "/session".to_owned(),
                status: 500,
            });
        }
        self.logged_in = false;
        Ok(())
    }

    async fn request(
        &self,
        method: RequestMethod,
        endpoint: &str,
    ) -> Result<ApiResponse, TransportError> {
        if !self.logged_in {
            return Err(TransportError::NotAuthenticated);
        }
        self.record(method, endpoint);
        let latency = self.next_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        match self.bodies.get(endpoint) {
            Some((status, body)) => {
                let body = if method == RequestMethod::Head {
                    Vec::new()
                } else {
                    body.clone().into_bytes()
                };
                Ok(ApiResponse::new(*status, body))
            }
            None => Err(TransportError::Scripted {
                message: format!("no scripted response for {}", endpoint),
            }),
        }
    }

    async fn version(&self) -> Result<String, TransportError> {
        if !self.logged_in {
            return Err(TransportError::NotAuthenticated);
        }
        Ok(self.version.clone())
    }

    fn host(&self) -> &str {
        &self.host
    }
}
