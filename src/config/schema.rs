//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Where the server credential comes from.
    pub credential: CredentialConfig,

    /// Caching directives applied to successful relays.
    pub cache: CacheConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,

    pub site: SiteConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Fixed base origin every path fragment is appended to.
    pub base_url: String,

    /// Value of the `Accept` header sent upstream.
    pub accept: String,

    /// Value of the `User-Agent` header sent upstream.
    pub user_agent: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total upstream request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Permitted path prefixes. Empty means every path is relayed.
    pub allowed_prefixes: Vec<String>,

    /// Honor `HTTPS_PROXY`/`HTTP_PROXY` for upstream calls.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            accept: "application/vnd.github.v3+json".to_string(),
            user_agent: concat!("github-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            allowed_prefixes: Vec::new(),
            system_proxy: true,
        }
    }
}

impl UpstreamConfig {
    /// Returns true if `path` may be relayed under the allow-list.
    pub fn permits(&self, path: &str) -> bool {
        self.allowed_prefixes.is_empty()
            || self
                .allowed_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Server credential configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Environment variable holding the upstream token.
    pub env_var: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            env_var: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Cache directives for successful responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Shared-cache freshness lifetime in seconds.
    pub s_maxage_secs: u64,

    /// Allow intermediaries to serve stale copies while revalidating.
    pub stale_while_revalidate: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            s_maxage_secs: 3600,
            stale_while_revalidate: true,
        }
    }
}

impl CacheConfig {
    /// Render the `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        if self.stale_while_revalidate {
            format!("s-maxage={}, stale-while-revalidate", self.s_maxage_secs)
        } else {
            format!("s-maxage={}", self.s_maxage_secs)
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

/// Static site served next to the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding `index.html` and assets. Disabled when unset.
    pub static_dir: Option<String>,
}
