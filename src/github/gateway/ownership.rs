//! HTTP retrieval of the area-ownership document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::github::error::MonitorError;

use super::OwnershipSource;
use super::error_mapping::{map_http_error, map_reqwest_error};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("prmonitor/", env!("CARGO_PKG_VERSION"));

/// Fetches ownership documents over plain HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpOwnershipSource {
    client: Client,
}

impl HttpOwnershipSource {
    /// Creates a source with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, MonitorError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a source with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| MonitorError::Configuration {
                message: format!("failed to configure ownership HTTP client: {error}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OwnershipSource for HttpOwnershipSource {
    async fn fetch_text(&self, url: &str) -> Result<String, MonitorError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| map_reqwest_error("ownership document", &error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_http_error(
                "ownership document",
                status,
                Some(format!("while fetching {url}")),
            ));
        }

        response
            .text()
            .await
            .map_err(|error| map_reqwest_error("ownership document", &error))
    }
}
