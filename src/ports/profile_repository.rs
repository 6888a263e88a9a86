//! Profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::user::Profile;

use super::StoreError;

/// Repository port for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Overwrite an existing profile.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the profile doesn't exist
    async fn update(&self, profile: &Profile) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, StoreError>;

    /// Profiles for the given ids. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError>;

    /// Every profile. Admin only.
    async fn list_all(&self) -> Result<Vec<Profile>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}
