//! DocumentStore - Abstract CRUD storage for documents.

use super::{Document, StoreError, Versioned};

/// Abstract CRUD storage for documents.
pub trait DocumentStore: Send + Sync {
    /// Get a document by ID. Returns None if not found.
    fn get_doc<D: Document>(&self, id: &str) -> Result<Option<Versioned<D>>, StoreError>;

    /// Upsert a document (insert or update, no version check).
    fn save_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError>;

    /// Insert a new document. Fails if it already exists.
    fn insert_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError>;

    /// Update an existing document, conditional on its expected version.
    fn update_doc<D: Document>(
        &self,
        doc: &D,
        expected_version: u64,
    ) -> Result<Versioned<D>, StoreError>;

    /// Delete a document by ID. Returns true if it existed.
    fn delete_doc<D: Document>(&self, id: &str) -> Result<bool, StoreError>;

    /// Find documents matching a predicate.
    fn find_docs<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, StoreError>;
}
