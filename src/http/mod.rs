//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id assigned and propagated)
//!     → /api/github → gateway handler
//!     → /health     → status
//!     → anything else → static site (when configured)
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdExt, RequestIdGenerator, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
