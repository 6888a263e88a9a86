//! User profile handlers.

mod update_user_role;

pub use update_user_role::{UpdateUserRoleCommand, UpdateUserRoleHandler, UpdateUserRoleResult};
