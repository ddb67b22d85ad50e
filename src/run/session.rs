use tracing::{info, warn};

use crate::error::{AppResult, StoreError, TransportError};
use crate::probe::{EndpointDriver, RepeatPlan};
use crate::record::{CallMode, timestamp_now};
use crate::store::ResultStore;
use crate::transport::Transport;

use super::model::{ModeResults, TestRun};

/// Where the recorded appliance version comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Ask the appliance after login.
    Query,
    /// Record this value without asking.
    Pinned(String),
}

/// Everything a run needs besides the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub endpoints: Vec<String>,
    pub plan: RepeatPlan,
    pub version: VersionSource,
}

/// A run that has not logged in yet.
pub struct ProfileSession<T> {
    transport: T,
}

/// A logged-in run, ready to measure.
pub struct AuthenticatedSession<T> {
    transport: T,
}

/// A finished run holding its record and the still-open session.
pub struct CompletedRun<T> {
    transport: T,
    record: TestRun,
}

impl<T: Transport> ProfileSession<T> {
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Logs in to the appliance.
    ///
    /// # Errors
    ///
    /// Returns an error when the appliance rejects the credentials or cannot be reached.
    pub async fn authenticate(mut self) -> Result<AuthenticatedSession<T>, TransportError> {
        self.transport.login().await?;
        Ok(AuthenticatedSession {
            transport: self.transport,
        })
    }
}

impl<T: Transport> AuthenticatedSession<T> {
    /// Resolves the version, then drives list, detail and head mode in turn
    /// over the same endpoints.
    ///
    /// The session is logged out when a transport failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure.
    pub async fn run(mut self, settings: &RunSettings) -> Result<CompletedRun<T>, TransportError> {
        match self.measure(settings).await {
            Ok(record) => Ok(CompletedRun {
                transport: self.transport,
                record,
            }),
            Err(err) => {
                logout_quietly(&mut self.transport).await;
                Err(err)
            }
        }
    }

    async fn measure(&self, settings: &RunSettings) -> Result<TestRun, TransportError> {
        let version = match &settings.version {
            VersionSource::Query => self.transport.version().await?,
            VersionSource::Pinned(version) => version.clone(),
        };
        let time = timestamp_now();

        let driver = EndpointDriver::new(&self.transport, &settings.plan);
        let mut tests = ModeResults::default();
        for mode in CallMode::ALL {
            info!(
                "Testing {} endpoints in {} mode",
                settings.endpoints.len(),
                mode
            );
            let results = driver.drive(&settings.endpoints, mode).await?;
            tests.insert(mode, results);
        }

        Ok(TestRun {
            time,
            version,
            ipaddress: self.transport.host().to_owned(),
            iterations: settings.plan.iterations,
            tests,
        })
    }
}

impl<T: Transport> CompletedRun<T> {
    #[must_use]
    pub const fn record(&self) -> &TestRun {
        &self.record
    }

    /// Appends the record to the run history.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read, parsed or written.
    pub async fn persist(&self, store: &ResultStore) -> Result<usize, StoreError> {
        store.append(&self.record).await
    }

    /// Logs out and hands back the record. A failed logout only warns.
    pub async fn close(mut self) -> TestRun {
        logout_quietly(&mut self.transport).await;
        self.record
    }
}

async fn logout_quietly<T: Transport>(transport: &mut T) {
    if let Err(err) = transport.logout().await {
        warn!("Logout from {} failed: {}", transport.host(), err);
    }
}

/// Runs one full session against `transport` and appends it to `store`.
///
/// # Errors
///
/// Returns an error when login, any measured call, or the store append fails.
pub async fn execute_run<T: Transport>(
    transport: T,
    settings: &RunSettings,
    store: &ResultStore,
) -> AppResult<TestRun> {
    let completed = ProfileSession::new(transport)
        .authenticate()
        .await?
        .run(settings)
        .await?;
    let stored = match completed.persist(store).await {
        Ok(stored) => stored,
        Err(err) => {
            completed.close().await;
            return Err(err.into());
        }
    };
    let record = completed.close().await;
    info!(
        "Stored {} in {} ({} runs)",
        record,
        store.path().display(),
        stored
    );
    Ok(record)
}
