//! Domain records stored by the service: sweets and users.

mod sweet;
mod user;

pub use sweet::Sweet;
pub use user::{Role, User, UserProfile};
