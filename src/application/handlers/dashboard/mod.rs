//! Admin dashboard queries.

mod get_admin_overview;

pub use get_admin_overview::GetAdminOverviewHandler;
