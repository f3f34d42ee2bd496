//! Request payload decoding and validation.
//!
//! Bodies are decoded from raw bytes so malformed JSON gets the same
//! failure envelope as any field error. An empty body decodes as an empty
//! object. Unknown fields are dropped; in particular, `quantity` never
//! passes through a sweet update.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::Role;
use crate::error::ApiError;
use crate::service::{NewSweet, RegisterInput, SweetChanges, SweetFilter};

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::invalid("Invalid JSON payload")),
    }
}

/// Read an optional string field, trimmed. A non-string value records an
/// error and reads as absent.
fn opt_string(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(format!("{} must be a string", key));
            None
        }
    }
}

/// Read a required string field, trimmed. Missing, null, or blank values
/// record "{key} is required"; non-string values record "{key} must be a
/// string". Exactly one error per failed field.
fn req_string(
    obj: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("{} is required", key));
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(format!("{} is required", key));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push(format!("{} must be a string", key));
            None
        }
    }
}

fn check_length(value: &str, key: &str, min: usize, max: usize, errors: &mut Vec<String>) -> bool {
    let len = value.chars().count();
    if len < min {
        errors.push(format!("{} must be at least {} characters", key, min));
        false
    } else if len > max {
        errors.push(format!("{} must be at most {} characters", key, max));
        false
    } else {
        true
    }
}

fn is_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// `POST /api/auth/register` body.
pub fn register_input(body: &[u8]) -> Result<RegisterInput, ApiError> {
    let obj = parse_object(body)?;
    let mut errors = Vec::new();

    let email = match req_string(&obj, "email", &mut errors) {
        Some(e) if is_email(&e) => Some(e.to_lowercase()),
        Some(_) => {
            errors.push("email must be a valid email".to_string());
            None
        }
        None => None,
    };

    let password = match req_string(&obj, "password", &mut errors) {
        Some(p) if p.chars().count() >= 8 => Some(p),
        Some(_) => {
            errors.push("password must be at least 8 characters".to_string());
            None
        }
        None => None,
    };

    let role = match opt_string(&obj, "role", &mut errors) {
        Some(r) => match r.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                errors.push("role must be either user or admin".to_string());
                Role::User
            }
        },
        None => Role::User,
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    // Both are Some once errors is empty.
    Ok(RegisterInput {
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
        role,
    })
}

/// `POST /api/auth/login` body. Email and password, both required.
pub fn login_input(body: &[u8]) -> Result<(String, String), ApiError> {
    let obj = parse_object(body)?;
    let mut errors = Vec::new();

    let email = match req_string(&obj, "email", &mut errors) {
        Some(e) if is_email(&e) => Some(e.to_lowercase()),
        Some(_) => {
            errors.push("email must be a valid email".to_string());
            None
        }
        None => None,
    };

    let password = req_string(&obj, "password", &mut errors);

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    Ok((email.unwrap_or_default(), password.unwrap_or_default()))
}

/// `POST /api/sweets` body. All fields required.
pub fn new_sweet(body: &[u8]) -> Result<NewSweet, ApiError> {
    let obj = parse_object(body)?;
    let mut errors = Vec::new();

    let name = req_string(&obj, "name", &mut errors)
        .filter(|n| check_length(n, "name", 2, 120, &mut errors));
    let category = req_string(&obj, "category", &mut errors)
        .filter(|c| check_length(c, "category", 2, 80, &mut errors));

    let price = match obj.get("price") {
        None | Some(Value::Null) => {
            errors.push("price is required".to_string());
            None
        }
        Some(v) => match v.as_f64() {
            Some(p) if p > 0.0 => Some(round_price(p)),
            _ => {
                errors.push("price must be a positive number".to_string());
                None
            }
        },
    };

    let quantity = match obj.get("quantity") {
        None | Some(Value::Null) => {
            errors.push("quantity is required".to_string());
            None
        }
        Some(v) => match v.as_u64() {
            Some(q) => Some(q),
            None => {
                errors.push("quantity must be a non-negative integer".to_string());
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    Ok(NewSweet {
        name: name.unwrap_or_default(),
        category: category.unwrap_or_default(),
        price: price.unwrap_or_default(),
        quantity: quantity.unwrap_or_default(),
    })
}

/// `PUT /api/sweets/:id` body. Any of name/category/price; at least one.
/// Everything else, quantity included, is dropped.
pub fn sweet_changes(body: &[u8]) -> Result<SweetChanges, ApiError> {
    let obj = parse_object(body)?;
    let mut errors = Vec::new();

    let name = opt_string(&obj, "name", &mut errors)
        .filter(|n| check_length(n, "name", 2, 120, &mut errors));
    let category = opt_string(&obj, "category", &mut errors)
        .filter(|c| check_length(c, "category", 2, 80, &mut errors));

    let price = match obj.get("price") {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_f64() {
            Some(p) if p > 0.0 => Some(round_price(p)),
            _ => {
                errors.push("price must be a positive number".to_string());
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    if name.is_none() && category.is_none() && price.is_none() {
        return Err(ApiError::invalid("at least one field is required"));
    }

    Ok(SweetChanges {
        name,
        category,
        price,
    })
}

/// `GET /api/sweets/search` query parameters.
pub fn search_filter(params: &HashMap<String, String>) -> Result<SweetFilter, ApiError> {
    let mut errors = Vec::new();

    let name = params
        .get("name")
        .map(|n| n.trim().to_string())
        .filter(|n| check_length(n, "name", 2, 120, &mut errors));
    let category = params
        .get("category")
        .map(|c| c.trim().to_string())
        .filter(|c| check_length(c, "category", 2, 80, &mut errors));

    let min_price = parse_price_param(params, "minPrice", &mut errors);
    let max_price = parse_price_param(params, "maxPrice", &mut errors);

    if let (Some(min), Some(max)) = (min_price, max_price) {
        if max < min {
            errors.push("maxPrice must be greater than or equal to minPrice".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    Ok(SweetFilter {
        name,
        category,
        min_price,
        max_price,
    })
}

fn parse_price_param(
    params: &HashMap<String, String>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let raw = params.get(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v >= 0.0 => Some(v),
        Ok(_) => {
            errors.push(format!("{} must be greater than or equal to 0", key));
            None
        }
        Err(_) => {
            errors.push(format!("{} must be a number", key));
            None
        }
    }
}

/// Purchase/restock body: optional `quantity`, defaulting to 1.
///
/// Only shape is checked here (integer, at most 1000). Whether the amount
/// is at least 1 is decided by the stock adjustment itself, after the
/// sweet has been resolved.
pub fn quantity(body: &[u8]) -> Result<i64, ApiError> {
    let obj = parse_object(body)?;

    match obj.get("quantity") {
        None | Some(Value::Null) => Ok(1),
        Some(v) => match v.as_i64() {
            Some(q) if q <= 1000 => Ok(q),
            Some(_) => Err(ApiError::invalid("quantity must be at most 1000")),
            None => Err(ApiError::invalid("quantity must be an integer")),
        },
    }
}
