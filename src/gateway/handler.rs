//! The `/api/github` endpoint.

use std::time::Instant;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::gateway::credentials::CredentialSource;
use crate::gateway::error::GatewayError;
use crate::gateway::upstream::UpstreamReply;
use crate::gateway::GatewayState;
use crate::http::server::AppState;
use crate::http::RequestIdExt;
use crate::observability::metrics;

/// Query parameters accepted by the gateway.
#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    /// Upstream path fragment, e.g. `users/rootLocalGhost`.
    pub path: Option<String>,
}

/// Run the ordered checks, then relay a single upstream call.
///
/// Order: credential, path presence, allow-list, upstream. Each failure
/// short-circuits.
pub async fn handle(
    state: &GatewayState,
    credentials: &dyn CredentialSource,
    path: Option<&str>,
) -> Result<Value, GatewayError> {
    let credential = credentials
        .load()
        .ok_or_else(|| GatewayError::MissingCredential(credentials.name().to_string()))?;

    let path = path
        .filter(|p| !p.is_empty())
        .ok_or(GatewayError::MissingPath)?;

    if !state.config.upstream.permits(path) {
        return Err(GatewayError::PathNotAllowed);
    }

    let started = Instant::now();
    let reply = state.upstream.get(path, &credential).await;
    metrics::record_upstream_latency(started);

    match reply? {
        UpstreamReply::Success(payload) => Ok(payload),
        UpstreamReply::Failure { status, details } => {
            Err(GatewayError::Upstream { status, details })
        }
    }
}

/// Axum handler; mounted for every method.
pub async fn github_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ApiQuery>, QueryRejection>,
) -> Response {
    let started = Instant::now();
    let current = state.inner.load_full();
    let path = query.ok().and_then(|Query(q)| q.path);

    match handle(&current, current.credentials.as_ref(), path.as_deref()).await {
        Ok(payload) => {
            metrics::record_request("success", StatusCode::OK.as_u16(), started);
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, current.config.cache.header_value())],
                Json(payload),
            )
                .into_response()
        }
        Err(err) => {
            if let GatewayError::Transport(cause) = &err {
                tracing::error!(
                    request_id = %headers.request_id(),
                    path = ?path,
                    error = %cause,
                    "Failed to fetch data from upstream"
                );
            }
            metrics::record_request(err.outcome(), err.status().as_u16(), started);
            err.into_response()
        }
    }
}
