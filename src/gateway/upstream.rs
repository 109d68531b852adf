//! Outbound client for the upstream API.
//!
//! One GET per call, no retries. The target URL is the configured base origin
//! joined with the caller's fragment verbatim.

use std::time::Duration;
use axum::http::StatusCode;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::{Map, Value};

use crate::config::UpstreamConfig;
use crate::gateway::credentials::Credential;
use crate::gateway::error::TransportError;

/// Outcome of an upstream call that completed at the HTTP level.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// 2xx with a JSON payload.
    Success(Value),
    /// Non-success status; `details` is the parsed body or `{}`.
    Failure { status: StatusCode, details: Value },
}

/// HTTP client bound to a single upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    accept: String,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept: config.accept.clone(),
        })
    }

    /// Upstream URL for a path fragment. The fragment is not encoded or checked.
    pub fn target_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issue the credentialed GET for `path`.
    pub async fn get(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<UpstreamReply, TransportError> {
        let mut authorization = HeaderValue::from_str(&format!("token {}", credential.expose()))
            .map_err(|_| TransportError::InvalidCredential)?;
        authorization.set_sensitive(true);

        let response = self
            .http
            .get(self.target_url(path))
            .header(ACCEPT, self.accept.as_str())
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::Object(Map::new()));
            return Ok(UpstreamReply::Failure { status, details });
        }

        Ok(UpstreamReply::Success(response.json().await?))
    }
}
