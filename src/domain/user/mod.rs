//! User domain module.
//!
//! Profiles carry the display name and the role claim mirrored from the
//! identity provider.

mod errors;
mod profile;

pub use errors::UserError;
pub use profile::Profile;
