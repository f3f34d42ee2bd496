//! Authentication: password hashing, signed tokens, and principal
//! extraction from request headers.
//!
//! ## Example
//!
//! ```ignore
//! use sweetshop::auth::{self, TokenCodec};
//!
//! let hash = auth::hash_password("hunter22!")?;
//! assert!(auth::verify_password("hunter22!", &hash));
//!
//! let codec = TokenCodec::new("secret", 86_400);
//! let token = codec.issue(&user)?;
//! let claims = codec.verify(&token)?;
//! ```

mod password;
mod principal;
mod token;

pub use password::{hash_password, verify_password};
pub use principal::{authenticate, Principal};
pub use token::{Claims, TokenCodec};
