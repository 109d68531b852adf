use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::fallback::{self, Resolved};

/// Errors returned by [`GatewayClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent, or the body was not valid JSON.
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {body}")]
    Status { status: StatusCode, body: Value },
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub version: String,
    pub status: String,
    pub credential_configured: bool,
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch an upstream resource through the gateway.
    pub async fn fetch(&self, path: &str) -> Result<Value, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/github", self.gateway_url))
            .query(&[("path", path)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json().await.unwrap_or(Value::Null);
            return Err(ClientError::Status { status, body });
        }

        Ok(resp.json().await?)
    }

    /// Avatar URL for `username`, or its identicon when the lookup fails.
    pub async fn profile_image(&self, username: &str) -> Resolved<String> {
        let outcome = self.fetch(&format!("users/{username}")).await;
        fallback::resolve_avatar(username, outcome)
    }

    /// Up to four language tags for a repository.
    pub async fn repo_languages(&self, owner: &str, repo: &str) -> Resolved<Vec<String>> {
        let outcome = self.fetch(&format!("repos/{owner}/{repo}/languages")).await;
        fallback::resolve_languages(outcome)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let resp = self
            .client
            .get(format!("{}/health", self.gateway_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}
