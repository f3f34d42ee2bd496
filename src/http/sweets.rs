//! Handlers for `/api/sweets*`.
//!
//! Every route authenticates. Delete and restock additionally require the
//! admin role, checked before the target is resolved, so a non-admin gets
//! 403 even for an id that does not exist. Update resolves first and gates
//! on ownership inside the service.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::json;

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::policy::is_admin;
use crate::service;
use crate::store::DocumentStore;

use super::{payload, success, AppState};

/// `POST /api/sweets`
pub async fn create<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let principal = authenticate(&headers, &state.tokens)?;
    let input = payload::new_sweet(&body)?;
    let sweet = service::create_sweet(&state.store, &principal, input)?;
    Ok(success(StatusCode::CREATED, json!({ "sweet": sweet })))
}

/// `GET /api/sweets`
pub async fn list<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.tokens)?;
    let sweets = service::list_sweets(&state.store)?;
    Ok(success(StatusCode::OK, json!({ "sweets": sweets })))
}

/// `GET /api/sweets/search`
pub async fn search<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.tokens)?;
    let filter = payload::search_filter(&params)?;
    let sweets = service::search_sweets(&state.store, &filter)?;
    Ok(success(StatusCode::OK, json!({ "sweets": sweets })))
}

/// `PUT /api/sweets/:id`
pub async fn update<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let principal = authenticate(&headers, &state.tokens)?;
    let changes = payload::sweet_changes(&body)?;
    let sweet = service::update_sweet(&state.store, &id, &changes, &principal)?;
    Ok(success(StatusCode::OK, json!({ "sweet": sweet })))
}

/// `DELETE /api/sweets/:id`
pub async fn remove<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let principal = authenticate(&headers, &state.tokens)?;
    if !is_admin(Some(&principal)) {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }
    service::delete_sweet(&state.store, &id)?;
    Ok(success(StatusCode::OK, json!({ "deleted": true })))
}

/// `POST /api/sweets/:id/purchase`
pub async fn purchase<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.tokens)?;
    let amount = payload::quantity(&body)?;
    let sweet = service::purchase_sweet(&state.store, &id, amount)?;
    Ok(success(StatusCode::OK, json!({ "sweet": sweet })))
}

/// `POST /api/sweets/:id/restock`
pub async fn restock<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let principal = authenticate(&headers, &state.tokens)?;
    if !is_admin(Some(&principal)) {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }
    let amount = payload::quantity(&body)?;
    let sweet = service::restock_sweet(&state.store, &id, amount)?;
    Ok(success(StatusCode::OK, json!({ "sweet": sweet })))
}
