//! Handlers for `/api/auth/*`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::json;

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::service;
use crate::store::DocumentStore;

use super::{payload, success, AppState};

/// `POST /api/auth/register`
pub async fn register<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input = payload::register_input(&body)?;
    let auth = service::register(&state.store, &state.tokens, input)?;
    Ok(success(StatusCode::CREATED, auth))
}

/// `POST /api/auth/login`
pub async fn login<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let (email, password) = payload::login_input(&body)?;
    let auth = service::login(&state.store, &state.tokens, &email, &password)?;
    Ok(success(StatusCode::OK, auth))
}

/// `GET /api/auth/me`
pub async fn me<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let principal = authenticate(&headers, &state.tokens)?;
    let user = service::profile(&state.store, &principal.id)?;
    Ok(success(StatusCode::OK, json!({ "user": user })))
}
