//! Delete Account Use Case
//!
//! Tombstones the user, drops the settings row, then cascades to owned
//! learning data. The steps are not atomic with each other.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{UserDataCascade, UserRepository, UserSettingsRepository};
use crate::error::{AccountError, AccountResult};

/// Delete account use case
pub struct DeleteAccountUseCase<U, S, C>
where
    U: UserRepository,
    S: UserSettingsRepository,
    C: UserDataCascade,
{
    user_repo: Arc<U>,
    settings_repo: Arc<S>,
    cascade: Arc<C>,
}

impl<U, S, C> DeleteAccountUseCase<U, S, C>
where
    U: UserRepository,
    S: UserSettingsRepository,
    C: UserDataCascade,
{
    pub fn new(user_repo: Arc<U>, settings_repo: Arc<S>, cascade: Arc<C>) -> Self {
        Self {
            user_repo,
            settings_repo,
            cascade,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountResult<()> {
        if !self.user_repo.soft_delete(user_id).await? {
            return Err(AccountError::UserNotFound);
        }

        let settings_removed = self.settings_repo.delete_by_user_id(user_id).await?;
        let rows_tombstoned = self.cascade.tombstone_user_data(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            settings_removed,
            rows_tombstoned,
            "Account deleted"
        );

        Ok(())
    }
}
