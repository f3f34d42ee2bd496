//! Sweet - an inventory record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

/// A sweet in the shop's inventory.
///
/// `owner` is the email of the user who created the record. `quantity` is
/// only ever written by the purchase/restock path, which keeps it from
/// going negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweet {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u64,
    pub owner: String,
}

impl Sweet {
    /// Create a new sweet with a fresh id, owned by `owner`.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u64,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            owner: owner.into(),
        }
    }
}

impl Document for Sweet {
    const COLLECTION: &'static str = "sweets";

    fn id(&self) -> &str {
        &self.id
    }
}
