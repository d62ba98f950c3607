use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::domain::AuthToken;
use crate::config::LendingPlatformConfig;

pub const HEADER_TENANT_DOMAIN: &str = "x-tenant-domain";
pub const HEADER_PLATFORM: &str = "x-platform";
pub const PLATFORM_EMPLOYEE_API: &str = "EMPLOYEE_API";

/// Platform endpoints used during lead submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ClientAuth,
    ShortApplication,
    WorkflowBuild,
    WorkflowExecution,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::ClientAuth => "/auth/client",
            Self::ShortApplication => "/application/short",
            Self::WorkflowBuild => "/workflow/build",
            Self::WorkflowExecution => "/workflow/execution",
        }
    }
}

/// Status and decoded body of an upstream response. Bodies that are not JSON
/// are kept verbatim as a JSON string; empty bodies become `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) fn from_text(status: u16, text: String) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Self { status, body }
    }
}

/// Transport failure where no response was received.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// One JSON POST against the lending platform. Implementations attach the
/// tenant and platform headers to every call and the bearer token when given.
#[async_trait]
pub trait LendingTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: Endpoint,
        token: Option<&AuthToken>,
        body: Value,
    ) -> Result<UpstreamResponse, TransportError>;
}

/// `reqwest`-backed transport with a per-call timeout.
pub struct HttpTransport {
    client: Client,
    config: LendingPlatformConfig,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_base_url", &self.config.api_base_url)
            .field("tenant_domain", &self.config.tenant_domain)
            .field("timeout", &self.config.request_timeout)
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: LendingPlatformConfig) -> Result<Self, TransportError> {
        let tenant = HeaderValue::from_str(&config.tenant_domain).map_err(|err| {
            TransportError::InvalidRequest(format!("invalid tenant domain header: {err}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(HEADER_TENANT_DOMAIN, tenant);
        headers.insert(
            HEADER_PLATFORM,
            HeaderValue::from_static(PLATFORM_EMPLOYEE_API),
        );

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .user_agent(format!("lead-intake/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| {
                TransportError::InvalidRequest(format!("failed to create HTTP client: {err}"))
            })?;

        Ok(Self { client, config })
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.config.request_timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl LendingTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        token: Option<&AuthToken>,
        body: Value,
    ) -> Result<UpstreamResponse, TransportError> {
        let url = self.config.endpoint(endpoint.path());
        debug!(%url, authorized = token.is_some(), "posting to lending platform");

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(|err| self.classify(err))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|err| self.classify(err))?;

        Ok(UpstreamResponse::from_text(status, text))
    }
}
