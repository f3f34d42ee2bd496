//! Collection - Typed accessor for document CRUD operations.

use std::marker::PhantomData;

use super::{Document, DocumentStore, StoreError, Versioned};

/// Typed wrapper for accessing documents of a specific type.
pub struct Collection<'a, S, D> {
    store: &'a S,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore, D: Document> Collection<'a, S, D> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a document by ID.
    pub fn get(&self, id: &str) -> Result<Option<Versioned<D>>, StoreError> {
        self.store.get_doc(id)
    }

    /// Upsert a document (insert or update, no version check).
    pub fn save(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        self.store.save_doc(doc)
    }

    /// Insert a new document. Fails if it already exists.
    pub fn insert(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        self.store.insert_doc(doc)
    }

    /// Update an existing document, conditional on its expected version.
    pub fn update(&self, doc: &D, expected_version: u64) -> Result<Versioned<D>, StoreError> {
        self.store.update_doc(doc, expected_version)
    }

    /// Delete a document by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete_doc::<D>(id)
    }

    /// Find documents matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<Versioned<D>>, StoreError> {
        self.store.find_docs(predicate)
    }

    /// Find the first document matching a predicate.
    pub fn find_one(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Option<Versioned<D>>, StoreError> {
        Ok(self.store.find_docs(predicate)?.into_iter().next())
    }
}

/// Extension trait for typed document access on any DocumentStore.
pub trait DocumentsExt: DocumentStore + Sized {
    /// Get a typed collection accessor.
    fn docs<D: Document>(&self) -> Collection<'_, Self, D> {
        Collection::new(self)
    }
}

impl<S: DocumentStore> DocumentsExt for S {}
