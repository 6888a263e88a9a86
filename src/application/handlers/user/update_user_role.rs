//! UpdateUserRoleHandler - Admin changes a user's role.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Role, UserId};
use crate::domain::user::{Profile, UserError};
use crate::ports::ProfileRepository;

/// Command to change a user's role.
#[derive(Debug, Clone)]
pub struct UpdateUserRoleCommand {
    pub user_id: UserId,
    pub role: Role,
}

/// Result of a role change.
#[derive(Debug, Clone)]
pub struct UpdateUserRoleResult {
    pub profile: Profile,
    pub previous_role: Role,
}

pub struct UpdateUserRoleHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateUserRoleHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: UpdateUserRoleCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateUserRoleResult, UserError> {
        let mut profile = self
            .profiles
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(cmd.user_id.clone()))?;

        let previous_role = profile.change_role(metadata.identity(), cmd.role)?;
        self.profiles.update(&profile).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            from = %previous_role,
            to = %cmd.role,
            "User role changed"
        );

        Ok(UpdateUserRoleResult {
            profile,
            previous_role,
        })
    }
}
