//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and formats. All errors are
//! collected so one pass over a bad file reports everything wrong with it.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not a valid URL")]
    BaseUrl(String),

    #[error("upstream.base_url scheme must be http or https, got `{0}`")]
    BaseUrlScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("timeouts.request_secs ({inbound}) must exceed upstream.request_timeout_secs ({upstream})")]
    InboundTimeout { inbound: u64, upstream: u64 },

    #[error("credential.env_var must not be empty")]
    EmptyCredentialVar,

    #[error("upstream.allowed_prefixes entry `{0}` must be non-empty and must not start with `/`")]
    AllowedPrefix(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::BaseUrlScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone())),
    }

    let durations = [
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("upstream.request_timeout_secs", config.upstream.request_timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("cache.s_maxage_secs", config.cache.s_maxage_secs),
    ];
    for (field, value) in durations {
        if value == 0 {
            errors.push(ValidationError::ZeroDuration(field));
        }
    }

    // A hung upstream must surface as the JSON fetch failure, not the
    // inbound deadline's empty response.
    if config.timeouts.request_secs != 0
        && config.timeouts.request_secs <= config.upstream.request_timeout_secs
    {
        errors.push(ValidationError::InboundTimeout {
            inbound: config.timeouts.request_secs,
            upstream: config.upstream.request_timeout_secs,
        });
    }

    if config.credential.env_var.trim().is_empty() {
        errors.push(ValidationError::EmptyCredentialVar);
    }

    for prefix in &config.upstream.allowed_prefixes {
        if prefix.is_empty() || prefix.starts_with('/') {
            errors.push(ValidationError::AllowedPrefix(prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
