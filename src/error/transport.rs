use thiserror::Error;

/// Failures raised by a single call against the appliance.
///
/// None of these are retried by the measurement engine; they abort the run.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid appliance URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {endpoint} failed: {source}")]
    Request {
        method: &'static str,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {endpoint} returned status {status}.")]
    Status {
        method: &'static str,
        endpoint: String,
        status: u16,
    },
    #[error("Failed to decode response of GET {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Login to {host} failed with status {status}.")]
    LoginRejected { host: String, status: u16 },
    #[error("Login response from {host} carried no session id.")]
    MissingSessionId { host: String },
    #[error("Not logged in; call login() before issuing requests.")]
    NotAuthenticated,
    #[error("Version response carried no '{field}' field.")]
    MissingVersion { field: &'static str },
    #[cfg(test)]
    #[error("Scripted transport failure: {message}")]
    Scripted { message: String },
}
