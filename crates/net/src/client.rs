//! HTTP client wrapper

use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use vercheck_errors::{Error, NetworkError};

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300), // 5 minutes for the index archive
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("vercheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&vercheck_config::NetworkConfig> for NetConfig {
    fn from(config: &vercheck_config::NetworkConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout),
            connect_timeout: Duration::from_secs(config.connect_timeout),
            ..Self::default()
        }
    }
}

/// HTTP client with status checking
///
/// Requests are issued once; a failed fetch is reported to the caller, which
/// treats it as fatal.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: &NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(&NetConfig::default())
    }

    /// Execute a GET request and require a success status
    ///
    /// # Errors
    ///
    /// Returns an error on timeouts, connection failures, or a non-2xx status.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::convert_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            }
            .into());
        }

        Ok(response)
    }

    pub(crate) fn convert_error(url: &str, error: &reqwest::Error) -> Error {
        if error.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
            .into()
        } else if error.is_connect() {
            NetworkError::ConnectionRefused(error.to_string()).into()
        } else {
            NetworkError::DownloadFailed(error.to_string()).into()
        }
    }
}
