//! Client for the portfolio gateway.
//!
//! Page widgets never surface gateway failures to visitors. Each lookup here
//! resolves to either the primary value or a named default, see [`fallback`].

pub mod client;
pub mod fallback;

pub use client::{ClientError, GatewayClient, HealthStatus};
pub use fallback::{Resolved, MAX_LANGUAGE_TAGS, OFFLINE_TAG, SOURCE_CODE_TAG};
