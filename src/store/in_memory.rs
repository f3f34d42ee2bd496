//! In-memory document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::{Document, DocumentStore, StoreError, Versioned};

/// A stored document: its JSON body plus the current version.
struct Entry {
    body: Value,
    version: u64,
}

type Collections = HashMap<&'static str, HashMap<String, Entry>>;

/// Document store holding every collection in process memory.
///
/// Documents live in per-collection maps keyed by id. Clones share the
/// same storage through an Arc, so each request can hold a cheap handle.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

fn encode<D: Document>(doc: &D) -> Result<Value, StoreError> {
    serde_json::to_value(doc).map_err(|e| StoreError::Serde(e.to_string()))
}

fn decode<D: Document>(entry: &Entry) -> Result<Versioned<D>, StoreError> {
    let data = serde_json::from_value(entry.body.clone())
        .map_err(|e| StoreError::Serde(e.to_string()))?;
    Ok(Versioned {
        data,
        version: entry.version,
    })
}

impl DocumentStore for InMemoryStore {
    fn get_doc<D: Document>(&self, id: &str) -> Result<Option<Versioned<D>>, StoreError> {
        let collections = self.read()?;
        match collections.get(D::COLLECTION).and_then(|docs| docs.get(id)) {
            Some(entry) => decode(entry).map(Some),
            None => Ok(None),
        }
    }

    fn save_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        let body = encode(doc)?;
        let mut collections = self.write()?;
        let docs = collections.entry(D::COLLECTION).or_default();

        let version = docs.get(doc.id()).map_or(1, |e| e.version + 1);
        docs.insert(doc.id().to_string(), Entry { body, version });

        Ok(Versioned {
            data: doc.clone(),
            version,
        })
    }

    fn insert_doc<D: Document>(&self, doc: &D) -> Result<Versioned<D>, StoreError> {
        let body = encode(doc)?;
        let mut collections = self.write()?;
        let docs = collections.entry(D::COLLECTION).or_default();

        if let Some(existing) = docs.get(doc.id()) {
            return Err(StoreError::ConcurrencyConflict {
                collection: D::COLLECTION.to_string(),
                id: doc.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }

        docs.insert(doc.id().to_string(), Entry { body, version: 1 });

        Ok(Versioned {
            data: doc.clone(),
            version: 1,
        })
    }

    fn update_doc<D: Document>(
        &self,
        doc: &D,
        expected_version: u64,
    ) -> Result<Versioned<D>, StoreError> {
        let body = encode(doc)?;
        let mut collections = self.write()?;

        let entry = collections
            .get_mut(D::COLLECTION)
            .and_then(|docs| docs.get_mut(doc.id()))
            .ok_or_else(|| StoreError::NotFound {
                collection: D::COLLECTION.to_string(),
                id: doc.id().to_string(),
            })?;

        if entry.version != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                collection: D::COLLECTION.to_string(),
                id: doc.id().to_string(),
                expected: expected_version,
                actual: entry.version,
            });
        }

        entry.body = body;
        entry.version += 1;

        Ok(Versioned {
            data: doc.clone(),
            version: entry.version,
        })
    }

    fn delete_doc<D: Document>(&self, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.write()?;
        Ok(collections
            .get_mut(D::COLLECTION)
            .map_or(false, |docs| docs.remove(id).is_some()))
    }

    fn find_docs<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Versioned<D>>, StoreError> {
        let collections = self.read()?;
        let Some(docs) = collections.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        for entry in docs.values() {
            let versioned = decode::<D>(entry)?;
            if predicate(&versioned.data) {
                found.push(versioned);
            }
        }
        Ok(found)
    }
}
