//! Authorization predicates over sweets and principals.
//!
//! Two independent gates: updates go through [`can_manage_sweet`]
//! (ownership or admin), while delete and restock go through [`is_admin`]
//! alone. An owner who is not an admin can edit their own sweet but cannot
//! delete or restock it.

use crate::auth::Principal;
use crate::domain::{Role, Sweet};

/// May this principal modify the given sweet? Admins always; everyone else
/// only if they own it.
pub fn can_manage_sweet(sweet: &Sweet, principal: Option<&Principal>) -> bool {
    match principal {
        None => false,
        Some(p) if p.role == Role::Admin => true,
        Some(p) => sweet.owner == p.email,
    }
}

/// Does this principal hold the admin role?
pub fn is_admin(principal: Option<&Principal>) -> bool {
    matches!(principal, Some(p) if p.role == Role::Admin)
}
