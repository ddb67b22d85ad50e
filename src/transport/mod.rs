//! Capability interface to the appliance's REST API and its HTTP implementation.
mod client;
mod response;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::error::TransportError;

pub use client::{ApplianceClient, ClientConfig};
pub use response::{ApiResponse, RequestMethod};

/// Authenticated access to the appliance.
///
/// One instance backs exactly one run and is never shared between runs.
/// Implementations do not retry: every failure is returned to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Opens a session.
    ///
    /// # Errors
    ///
    /// Returns an error when the appliance rejects the credentials or cannot be reached.
    async fn login(&mut self) -> Result<(), TransportError>;

    /// Closes the session opened by [`Transport::login`].
    ///
    /// # Errors
    ///
    /// Returns an error when the appliance cannot be reached.
    async fn logout(&mut self) -> Result<(), TransportError>;

    /// Issues one request and returns the status with the full body.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failures; a non-success status is not an error here.
    async fn request(
        &self,
        method: RequestMethod,
        endpoint: &str,
    ) -> Result<ApiResponse, TransportError>;

    /// Issues one HEAD request.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failures.
    async fn head(&self, endpoint: &str) -> Result<ApiResponse, TransportError> {
        self.request(RequestMethod::Head, endpoint).await
    }

    /// Reports the appliance software version.
    ///
    /// # Errors
    ///
    /// Returns an error when the version cannot be fetched or is missing from the response.
    async fn version(&self) -> Result<String, TransportError>;

    /// Host identifier recorded with every result.
    fn host(&self) -> &str;
}
