//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway, health and static site handlers
//! - Wire up middleware (tracing, timeout, request ID, security headers)
//! - Bind server to listener
//! - Apply hot-reloaded configuration

use std::sync::Arc;
use std::time::Duration;
use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::gateway::{github_proxy, CredentialSource, GatewayState};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::security::with_security_headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current config, upstream client and credential source, replaced
    /// atomically on reload.
    pub inner: Arc<ArcSwap<GatewayState>>,
    /// Explicit credential source that outlives reloads. When unset each
    /// reload reads from its own `credential.env_var`.
    credential_override: Option<Arc<dyn CredentialSource>>,
}

impl AppState {
    /// Swap in a new configuration. Returns false if it was rejected.
    pub fn apply(&self, config: GatewayConfig) -> bool {
        match self.build(config) {
            Ok(next) => {
                tracing::info!(
                    base_url = %next.config.upstream.base_url,
                    credential = next.credentials.name(),
                    allowed_prefixes = next.config.upstream.allowed_prefixes.len(),
                    "Configuration reloaded"
                );
                self.inner.store(Arc::new(next));
                metrics::record_config_reload("applied");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build upstream client, keeping current configuration");
                metrics::record_config_reload("rejected");
                false
            }
        }
    }

    fn build(&self, config: GatewayConfig) -> Result<GatewayState, reqwest::Error> {
        let state = GatewayState::from_config(config)?;
        Ok(match &self.credential_override {
            Some(credentials) => state.with_credentials(credentials.clone()),
            None => state,
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a server reading its credential from the configured variable.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        Self::build(config, None)
    }

    /// Create a server with an explicit credential source, kept across reloads.
    pub fn with_credentials(
        config: GatewayConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, reqwest::Error> {
        Self::build(config, Some(credentials))
    }

    fn build(
        config: GatewayConfig,
        credential_override: Option<Arc<dyn CredentialSource>>,
    ) -> Result<Self, reqwest::Error> {
        let mut gateway = GatewayState::from_config(config.clone())?;
        if let Some(credentials) = &credential_override {
            gateway = gateway.with_credentials(credentials.clone());
        }
        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(gateway)),
            credential_override,
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/api/github", any(github_proxy))
            .route("/health", get(health))
            .with_state(state);

        if let Some(dir) = &config.site.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        if config.security.enable_headers {
            router = with_security_headers(router);
        }

        router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                // Failures are logged by the gateway handler, not per 5xx status.
                .layer(TraceLayer::new_for_http().on_failure(()))
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.timeouts.request_secs),
                )),
        )
    }

    /// The assembled router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, applying config updates as
    /// they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                state.apply(config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub credential_configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        credential_configured: state.inner.load().credentials.load().is_some(),
    })
}
