//! Credentialed gateway for the GitHub REST API.
//!
//! Serves `/api/github?path=<fragment>` for the portfolio site, injecting a
//! server-held token so the browser never sees it.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use gateway::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
