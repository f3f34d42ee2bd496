//! Document store - versioned CRUD storage for the service's records.
//!
//! Every stored document carries a version that increments on each write.
//! Updates are conditional on the version the caller read, which gives the
//! service optimistic concurrency without locks. The store trait is
//! pluggable: the in-memory backend covers tests and development runs, and
//! a document database can slot in behind the same trait.
//!
//! ## Example
//!
//! ```ignore
//! use sweetshop::store::{DocumentsExt, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let sweets = store.docs::<Sweet>();
//!
//! let saved = sweets.save(&sweet)?;
//! let updated = sweets.update(&changed, saved.version)?;
//! ```

mod backend;
mod collection;
mod in_memory;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as documents.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g., "sweets", "users").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this document instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around document data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency conflict.
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Document not found.
    NotFound { collection: String, id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "version conflict on {}/{}: expected {}, found {}",
                collection, id, expected, actual
            ),
            StoreError::Serde(msg) => write!(f, "document (de)serialization failed: {}", msg),
            StoreError::Storage(msg) => write!(f, "storage failure: {}", msg),
            StoreError::NotFound { collection, id } => {
                write!(f, "no document {}/{}", collection, id)
            }
        }
    }
}

impl std::error::Error for StoreError {}

pub use backend::DocumentStore;
pub use collection::{Collection, DocumentsExt};
pub use in_memory::InMemoryStore;
