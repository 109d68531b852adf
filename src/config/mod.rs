//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → swapped into the server's shared state
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → sent to the server, which swaps its state atomically
//! ```
//!
//! The server credential is deliberately not part of the file: only the name
//! of the environment variable that holds it is.

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CacheConfig, CredentialConfig, GatewayConfig, ListenerConfig, ObservabilityConfig,
    SecurityConfig, SiteConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
