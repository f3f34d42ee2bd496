//! Sweet CRUD, search, and the purchase/restock stock accounting.

use crate::auth::Principal;
use crate::domain::Sweet;
use crate::error::ApiError;
use crate::policy::can_manage_sweet;
use crate::store::{DocumentStore, DocumentsExt, StoreError, Versioned};

/// Validated input for creating a sweet.
#[derive(Debug, Clone)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u64,
}

/// Partial update for a sweet. Quantity is deliberately absent: stock only
/// moves through purchase and restock.
#[derive(Debug, Clone, Default)]
pub struct SweetChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

/// Search filter. Name and category match exactly; prices are inclusive
/// bounds.
#[derive(Debug, Clone, Default)]
pub struct SweetFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Which way a stock adjustment moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    Purchase,
    Restock,
}

fn not_found() -> ApiError {
    ApiError::NotFound("Sweet not found".to_string())
}

/// Create a sweet owned by the calling principal.
pub fn create_sweet<S: DocumentStore>(
    store: &S,
    principal: &Principal,
    input: NewSweet,
) -> Result<Sweet, ApiError> {
    let sweet = Sweet::new(
        input.name,
        input.category,
        input.price,
        input.quantity,
        &principal.email,
    );
    store.docs::<Sweet>().insert(&sweet)?;
    Ok(sweet)
}

/// All sweets, sorted by name.
pub fn list_sweets<S: DocumentStore>(store: &S) -> Result<Vec<Sweet>, ApiError> {
    let mut sweets: Vec<Sweet> = store
        .docs::<Sweet>()
        .find(&|_| true)?
        .into_iter()
        .map(|v| v.data)
        .collect();
    sweets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sweets)
}

/// Sweets matching the filter, sorted by name.
pub fn search_sweets<S: DocumentStore>(
    store: &S,
    filter: &SweetFilter,
) -> Result<Vec<Sweet>, ApiError> {
    let mut sweets: Vec<Sweet> = store
        .docs::<Sweet>()
        .find(&|s| {
            filter.name.as_deref().map_or(true, |n| s.name == n)
                && filter.category.as_deref().map_or(true, |c| s.category == c)
                && filter.min_price.map_or(true, |min| s.price >= min)
                && filter.max_price.map_or(true, |max| s.price <= max)
        })?
        .into_iter()
        .map(|v| v.data)
        .collect();
    sweets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sweets)
}

/// Apply a partial update to a sweet the principal may manage.
///
/// Resolution comes first (404 beats 403 for a missing id). The write is
/// conditional on the version read; on a conflict the record is re-read
/// and the gate and changes re-applied.
pub fn update_sweet<S: DocumentStore>(
    store: &S,
    id: &str,
    changes: &SweetChanges,
    principal: &Principal,
) -> Result<Sweet, ApiError> {
    let sweets = store.docs::<Sweet>();
    let mut current = sweets.get(id)?.ok_or_else(not_found)?;

    loop {
        if !can_manage_sweet(&current.data, Some(principal)) {
            return Err(ApiError::Forbidden("You do not own this sweet".to_string()));
        }

        let mut sweet = current.data.clone();
        if let Some(name) = &changes.name {
            sweet.name = name.clone();
        }
        if let Some(category) = &changes.category {
            sweet.category = category.clone();
        }
        if let Some(price) = changes.price {
            sweet.price = price;
        }

        match sweets.update(&sweet, current.version) {
            Ok(saved) => return Ok(saved.data),
            Err(StoreError::ConcurrencyConflict { .. }) => {
                current = sweets.get(id)?.ok_or_else(not_found)?;
            }
            Err(StoreError::NotFound { .. }) => return Err(not_found()),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Delete a sweet. The admin gate runs at the HTTP layer.
pub fn delete_sweet<S: DocumentStore>(store: &S, id: &str) -> Result<(), ApiError> {
    if store.docs::<Sweet>().delete(id)? {
        Ok(())
    } else {
        Err(not_found())
    }
}

/// Decrement stock by `amount` (default 1 applied upstream).
pub fn purchase_sweet<S: DocumentStore>(
    store: &S,
    id: &str,
    amount: i64,
) -> Result<Sweet, ApiError> {
    adjust_quantity(store, id, amount, StockDirection::Purchase)
}

/// Increment stock by `amount`. The admin gate runs at the HTTP layer.
pub fn restock_sweet<S: DocumentStore>(
    store: &S,
    id: &str,
    amount: i64,
) -> Result<Sweet, ApiError> {
    adjust_quantity(store, id, amount, StockDirection::Restock)
}

/// Move a sweet's quantity by `amount` in the given direction.
///
/// Failure order is fixed: a missing record is NotFound before the amount
/// is looked at; an amount below 1 is invalid before stock is checked; a
/// purchase larger than the stock is OutOfStock. Quantity can never go
/// negative. The write is version-conditional; concurrent adjustments
/// re-read and re-check against fresh stock.
pub fn adjust_quantity<S: DocumentStore>(
    store: &S,
    id: &str,
    amount: i64,
    direction: StockDirection,
) -> Result<Sweet, ApiError> {
    let sweets = store.docs::<Sweet>();
    let mut current: Versioned<Sweet> = sweets.get(id)?.ok_or_else(not_found)?;

    if amount < 1 {
        return Err(ApiError::invalid("Quantity must be at least 1"));
    }
    let amount = amount as u64;

    loop {
        let mut sweet = current.data.clone();
        match direction {
            StockDirection::Purchase => {
                if sweet.quantity < amount {
                    return Err(ApiError::OutOfStock(format!(
                        "Sweet is out of stock. Only {} units available",
                        sweet.quantity
                    )));
                }
                sweet.quantity -= amount;
            }
            StockDirection::Restock => {
                sweet.quantity = sweet.quantity.saturating_add(amount);
            }
        }

        match sweets.update(&sweet, current.version) {
            Ok(saved) => return Ok(saved.data),
            Err(StoreError::ConcurrencyConflict { .. }) => {
                current = sweets.get(id)?.ok_or_else(not_found)?;
            }
            Err(StoreError::NotFound { .. }) => return Err(not_found()),
            Err(e) => return Err(e.into()),
        }
    }
}
