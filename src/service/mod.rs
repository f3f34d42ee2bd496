//! Service layer - the operations behind the HTTP surface.
//!
//! Free functions over a [`DocumentStore`](crate::store::DocumentStore),
//! so the in-memory backend and any future database backend run the same
//! logic. Handlers stay thin: decode, authenticate, call one of these.

mod auth;
mod sweets;

pub use auth::{login, profile, register, AuthResponse, RegisterInput};
pub use sweets::{
    adjust_quantity, create_sweet, delete_sweet, list_sweets, purchase_sweet, restock_sweet,
    search_sweets, update_sweet, NewSweet, StockDirection, SweetChanges, SweetFilter,
};
