use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub lending: LendingPlatformConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            lending: LendingPlatformConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5050";
pub const DEFAULT_API_PREFIX: &str = "/alpha/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Connection details for the upstream loan-origination platform.
///
/// The client secret never leaves the server process; `Debug` output redacts it.
#[derive(Clone)]
pub struct LendingPlatformConfig {
    pub api_base_url: String,
    pub api_prefix: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_domain: String,
    pub request_timeout: Duration,
}

impl LendingPlatformConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        let api_prefix =
            env::var("LENDING_API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string());

        let timeout_ms = match env::var("LENDING_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            api_base_url,
            api_prefix,
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            tenant_domain: required("TENANT_DOMAIN")?,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Joins the base URL, API prefix, and an endpoint suffix such as `/auth/client`.
    pub fn endpoint(&self, suffix: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let suffix = suffix.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{base}/{suffix}")
        } else {
            format!("{base}/{prefix}/{suffix}")
        }
    }
}

impl fmt::Debug for LendingPlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LendingPlatformConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_prefix", &self.api_prefix)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_domain", &self.tenant_domain)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBaseUrl(String),
    InvalidTimeout,
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBaseUrl(value) => {
                write!(f, "API_BASE_URL must be an http(s) URL, got '{value}'")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "LENDING_TIMEOUT_MS must be a positive number of milliseconds")
            }
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBaseUrl(_)
            | ConfigError::InvalidTimeout
            | ConfigError::Missing(_) => None,
        }
    }
}
