//! Principal extraction from the Authorization header.

use axum::http::{header, HeaderMap};

use crate::domain::Role;
use crate::error::ApiError;

use super::token::{Claims, TokenCodec};

/// The authenticated actor behind a request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Authenticate a request from its headers.
///
/// A missing or non-Bearer Authorization header fails with
/// "Authentication required"; a present but unverifiable token fails with
/// "Invalid or expired token".
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<Principal, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Authentication("Authentication required".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Authentication("Authentication required".to_string()))?;

    codec.verify(token).map(Principal::from)
}
