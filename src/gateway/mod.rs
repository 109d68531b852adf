//! Credentialed proxy gateway.
//!
//! # Data Flow
//! ```text
//! GET /api/github?path=<fragment>
//!     → handler.rs (credential check, path check, allow-list)
//!     → upstream.rs (base + "/" + fragment, Accept + Authorization)
//!     → 200 + Cache-Control on success
//!     → error.rs envelope {error, details?} otherwise
//! ```
//!
//! The handler keeps no state between invocations. The credential is looked
//! up per request and never leaves the server.

pub mod credentials;
pub mod error;
pub mod handler;
pub mod upstream;

pub use credentials::{Credential, CredentialSource, EnvCredential, StaticCredential};
pub use error::{GatewayError, TransportError};
pub use handler::{github_proxy, handle, ApiQuery};
pub use upstream::{UpstreamClient, UpstreamReply};

use std::sync::Arc;

use crate::config::GatewayConfig;

/// Configuration snapshot plus the client and credential source built from it.
///
/// Swapped as a unit on reload so a request never sees a client or
/// credential that disagrees with its config.
#[derive(Clone)]
pub struct GatewayState {
    pub config: GatewayConfig,
    pub upstream: UpstreamClient,
    pub credentials: Arc<dyn CredentialSource>,
}

impl GatewayState {
    /// Build state whose credential comes from `credential.env_var`.
    pub fn from_config(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::from_config(&config.upstream)?;
        let credentials = Arc::new(EnvCredential::new(config.credential.env_var.clone()));
        Ok(Self {
            config,
            upstream,
            credentials,
        })
    }

    /// Replace the credential source derived from the config.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = credentials;
        self
    }
}
