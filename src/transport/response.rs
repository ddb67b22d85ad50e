use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Delete,
}

impl RequestMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// Status and raw body of one appliance response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Passes the response through when its status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] for any other status.
    pub fn error_for_status(
        self,
        method: RequestMethod,
        endpoint: &str,
    ) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                method: method.as_str(),
                endpoint: endpoint.to_owned(),
                status: self.status,
            })
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] when the body is not valid JSON.
    pub fn json(&self, endpoint: &str) -> Result<serde_json::Value, TransportError> {
        serde_json::from_slice(&self.body).map_err(|err| TransportError::Decode {
            endpoint: endpoint.to_owned(),
            source: err,
        })
    }
}
