//! Security subsystem.
//!
//! The credential itself lives in `gateway::credentials`; this module only
//! hardens what goes back to browsers.

pub mod headers;

pub use headers::with_security_headers;
