//! HTTP transport - routes, handlers, and the response envelope.
//!
//! Every response body uses the same envelope: successes are
//! `{ "success": true, "data": ... }`, failures are
//! `{ "success": false, "message": ..., "errors"?: [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sweetshop::auth::TokenCodec;
//! use sweetshop::http::{router, AppState};
//! use sweetshop::store::InMemoryStore;
//!
//! let state = Arc::new(AppState {
//!     store: InMemoryStore::new(),
//!     tokens: TokenCodec::new("secret", 86_400),
//! });
//! let app = router(state);
//! axum::serve(listener, app).await?;
//! ```

mod auth;
mod payload;
mod sweets;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::auth::TokenCodec;
use crate::error::ApiError;
use crate::store::DocumentStore;

/// Shared request state: the document store and the token codec.
pub struct AppState<S> {
    pub store: S,
    pub tokens: TokenCodec,
}

/// Build the API router over the given state.
pub fn router<S: DocumentStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/sweets", get(sweets::list).post(sweets::create))
        .route("/api/sweets/search", get(sweets::search))
        .route("/api/sweets/:id", put(sweets::update).delete(sweets::remove))
        .route("/api/sweets/:id/purchase", post(sweets::purchase))
        .route("/api/sweets/:id/restock", post(sweets::restock))
        .fallback(route_not_found)
        .with_state(state)
}

/// Wrap `data` in the success envelope.
pub(crate) fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(json!({ "success": true, "data": data }))).into_response()
}

/// `GET /health` - liveness probe, outside the envelope and unauthenticated.
async fn health_handler() -> Response {
    Json(json!({ "ok": true })).into_response()
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
