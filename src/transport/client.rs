use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url, header::AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, info};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::TransportError;

use super::{ApiResponse, RequestMethod, Transport};

/// Version responses report the release under this key.
const VERSION_FIELD: &str = "summary";

/// Connection settings for [`ApplianceClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub scheme: &'static str,
    pub host: String,
    pub root_segment: String,
    pub username: String,
    pub password: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub insecure: bool,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(alias = "id")]
    session_id: Option<String>,
}

/// Session-based HTTP client for the appliance REST API.
///
/// Every endpoint is resolved below `/<root_segment>/`; requests carry the
/// session id obtained at login in the `Authorization` header.
#[derive(Debug)]
pub struct ApplianceClient {
    client: Client,
    base: Url,
    host: String,
    root_segment: String,
    username: String,
    password: String,
    session: Option<String>,
}

impl ApplianceClient {
    /// Builds the HTTP client. No request is issued until [`Transport::login`].
    ///
    /// # Errors
    ///
    /// Returns an error when the host does not form a valid URL or the client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let raw_base = format!("{}://{}/", config.scheme, config.host);
        let base = Url::parse(&raw_base).map_err(|err| TransportError::InvalidUrl {
            url: raw_base.clone(),
            source: err,
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|err| TransportError::BuildClientFailed { source: err })?;

        Ok(Self {
            client,
            base,
            host: config.host,
            root_segment: config.root_segment,
            username: config.username,
            password: config.password,
            session: None,
        })
    }

    fn url(&self, endpoint: &str) -> Result<Url, TransportError> {
        let relative = format!("{}/{}", self.root_segment, endpoint.trim_start_matches('/'));
        self.base
            .join(&relative)
            .map_err(|err| TransportError::InvalidUrl {
                url: relative.clone(),
                source: err,
            })
    }

    fn session(&self) -> Result<&str, TransportError> {
        self.session
            .as_deref()
            .ok_or(TransportError::NotAuthenticated)
    }

    async fn send(
        &self,
        method: RequestMethod,
        endpoint: &str,
        session: &str,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.url(endpoint)?;
        let request_error = |err| TransportError::Request {
            method: method.as_str(),
            endpoint: endpoint.to_owned(),
            source: err,
        };
        let response = self
            .client
            .request(to_reqwest_method(method), url)
            .header(AUTHORIZATION, format!("Actifio {}", session))
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(request_error)?;
        debug!(
            "{} {} -> {} ({} bytes)",
            method.as_str(),
            endpoint,
            status,
            body.len()
        );
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

fn to_reqwest_method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::GET,
        RequestMethod::Head => Method::HEAD,
        RequestMethod::Post => Method::POST,
        RequestMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ApplianceClient {
    async fn login(&mut self) -> Result<(), TransportError> {
        let url = self.url("/session")?;
        let request_error = |err| TransportError::Request {
            method: RequestMethod::Post.as_str(),
            endpoint: "/session".to_owned(),
            source: err,
        };
        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::LoginRejected {
                host: self.host.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(request_error)?;
        let session: SessionResponse =
            serde_json::from_slice(&body).map_err(|err| TransportError::Decode {
                endpoint: "/session".to_owned(),
                source: err,
            })?;
        let session_id = session
            .session_id
            .ok_or_else(|| TransportError::MissingSessionId {
                host: self.host.clone(),
            })?;
        info!("Logged in to {} as {}", self.host, self.username);
        self.session = Some(session_id);
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), TransportError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let endpoint = format!("/session/{}", session);
        self.send(RequestMethod::Delete, &endpoint, &session)
            .await?
            .error_for_status(RequestMethod::Delete, "/session")?;
        debug!("Logged out of {}", self.host);
        Ok(())
    }

    async fn request(
        &self,
        method: RequestMethod,
        endpoint: &str,
    ) -> Result<ApiResponse, TransportError> {
        let session = self.session()?;
        self.send(method, endpoint, session).await
    }

    async fn version(&self) -> Result<String, TransportError> {
        const ENDPOINT: &str = "/config/version";
        let body = self
            .request(RequestMethod::Get, ENDPOINT)
            .await?
            .error_for_status(RequestMethod::Get, ENDPOINT)?
            .json(ENDPOINT)?;
        body.get(VERSION_FIELD)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or(TransportError::MissingVersion {
                field: VERSION_FIELD,
            })
    }

    fn host(&self) -> &str {
        &self.host
    }
}
