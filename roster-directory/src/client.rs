//! HTTP client for the tabular directory endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DirectoryError;
use crate::source::EmployeeSource;
use crate::types::{normalize_rows, parse_envelope, EmployeeRecord, EmployeeRoster};

/// Connection settings for the directory endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Endpoint accepting the credential POST
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Hard request timeout; expiry triggers the fallback
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "https://backend.jotish.in/backend_dev/gettabledata.php".to_string()
}
fn default_username() -> String { "test".to_string() }
fn default_password() -> String { "123456".to_string() }
fn default_timeout_ms() -> u64 { 5000 }

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: default_username(),
            password: default_password(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl DirectoryConfig {
    /// Config pointing at a different endpoint, other settings default.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Request body sent to the endpoint.
#[derive(Debug, Serialize)]
struct CredentialBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Directory endpoint client.
///
/// [`fetch_employees`](Self::fetch_employees) never fails: any problem with
/// the request or the payload is logged and the fixed fallback roster is
/// returned instead, tagged [`crate::DataSource::Fallback`].
pub struct DirectoryClient {
    config: DirectoryConfig,
    client: Client,
}

impl DirectoryClient {
    /// Create a client with the configured timeout.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Fetch and normalize the roster, substituting the fallback on any failure.
    pub async fn fetch_employees(&self) -> EmployeeRoster {
        match self.try_fetch().await {
            Ok(records) => {
                info!(count = records.len(), "Loaded employee directory");
                EmployeeRoster::live(records)
            }
            Err(e) => {
                warn!(
                    endpoint = %self.config.endpoint,
                    error = %e,
                    "Directory fetch failed, using fallback roster"
                );
                EmployeeRoster::fallback()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<EmployeeRecord>, DirectoryError> {
        debug!(endpoint = %self.config.endpoint, "Requesting employee table");

        let body = CredentialBody {
            username: &self.config.username,
            password: &self.config.password,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| DirectoryError::from_transport(e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::from_transport(e, self.config.timeout_ms))?;
        let payload: serde_json::Value = serde_json::from_slice(&bytes)?;

        let rows = parse_envelope(&payload)?;
        Ok(normalize_rows(&rows))
    }
}

#[async_trait]
impl EmployeeSource for DirectoryClient {
    async fn fetch_employees(&self) -> EmployeeRoster {
        DirectoryClient::fetch_employees(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectoryConfig::default();
        assert_eq!(config.username, "test");
        assert_eq!(config.password, "123456");
        assert_eq!(config.timeout_ms, 5000);
        assert!(config.endpoint.ends_with("gettabledata.php"));
    }

    #[test]
    fn test_credential_body_shape() {
        let body = CredentialBody {
            username: "test",
            password: "123456",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "username": "test", "password": "123456" }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let client = DirectoryClient::new(
            DirectoryConfig::with_endpoint("http://127.0.0.1:1/gettabledata.php").with_timeout_ms(500),
        )
        .unwrap();

        let roster = client.fetch_employees().await;
        assert!(roster.is_degraded());
        assert_eq!(roster.records, crate::fallback_employees());
    }
}
