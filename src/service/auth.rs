//! Registration, login, and profile lookup.

use serde::Serialize;

use crate::auth::{hash_password, verify_password, TokenCodec};
use crate::domain::{Role, User, UserProfile};
use crate::error::ApiError;
use crate::store::{DocumentStore, DocumentsExt};

/// Validated registration input. Email arrives lowercased and trimmed from
/// the payload layer.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Token + profile pair returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Register a new account. The email must not already be taken.
pub fn register<S: DocumentStore>(
    store: &S,
    tokens: &TokenCodec,
    input: RegisterInput,
) -> Result<AuthResponse, ApiError> {
    let users = store.docs::<User>();

    if users.find_one(&|u| u.email == input.email)?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let hash = hash_password(&input.password)?;
    let user = User::new(input.email, hash, input.role);
    users.insert(&user)?;

    let token = tokens.issue(&user)?;
    Ok(AuthResponse {
        token,
        user: user.profile(),
    })
}

/// Log in with email and password. Unknown email and wrong password are
/// indistinguishable from the outside.
pub fn login<S: DocumentStore>(
    store: &S,
    tokens: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let users = store.docs::<User>();

    let user = users
        .find_one(&|u| u.email == email)?
        .map(|v| v.data)
        .ok_or_else(|| ApiError::Authentication("Invalid credentials".to_string()))?;

    if !verify_password(password, &user.password_hash) {
        return Err(ApiError::Authentication("Invalid credentials".to_string()));
    }

    let token = tokens.issue(&user)?;
    Ok(AuthResponse {
        token,
        user: user.profile(),
    })
}

/// Look up the profile of an authenticated user by id.
pub fn profile<S: DocumentStore>(store: &S, user_id: &str) -> Result<UserProfile, ApiError> {
    store
        .docs::<User>()
        .get(user_id)?
        .map(|v| v.data.profile())
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
