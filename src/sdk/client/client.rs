//! Core directory client implementation

use crate::sdk::{config::ClientConfig, errors::*};
use reqwest;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// HTTP client for the directory service
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    pub(crate) config: ClientConfig,
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: Url,
}

impl DirectoryClient {
    /// Create new directory client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| SDKError::ConfigError(format!("Invalid base url: {}", e)))?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // Build HTTP client
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.settings.timeout))
            .build()
            .map_err(|e| SDKError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        info!("DirectoryClient created for {}", base_url);

        Ok(Self {
            config,
            http_client,
            base_url,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves an endpoint path against the service root
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SDKError::InvalidRequest(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Sends a prepared request and returns the status with the raw body
    pub(crate) async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(u16, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| SDKError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SDKError::NetworkError(format!("Failed to read response: {}", e)))?;

        debug!("Response status: {}", status);
        Ok((status, body))
    }

    /// Sends a request and decodes a JSON body, treating non-2xx as an API error
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let (status, body) = self.execute(request).await?;
        if !(200..300).contains(&status) {
            return Err(SDKError::api(status, body));
        }
        serde_json::from_str(&body).map_err(|e| SDKError::ParseError(e.to_string()))
    }
}
