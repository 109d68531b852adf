//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Load config → Init logging/metrics → Start watcher → Serve
//!
//! Shutdown (shutdown.rs + signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger → server stops accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
