//! Profile Use Cases
//!
//! Read and partially update the caller's own profile.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::{User, validate_learning_goals};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{language_code::LanguageCode, proficiency_level::ProficiencyLevel};
use crate::error::{AccountError, AccountResult};

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }
}

/// Profile changes. `None` leaves a field unchanged; a present but blank
/// learning goal clears it.
#[derive(Debug, Default)]
pub struct EditProfileInput {
    pub level: Option<String>,
    pub native_language: Option<String>,
    pub target_language: Option<String>,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: Option<bool>,
}

/// Edit profile use case
pub struct EditProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> EditProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: EditProfileInput) -> AccountResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if let Some(level) = input.level {
            user.level = level.parse::<ProficiencyLevel>()?;
        }
        if let Some(code) = input.native_language {
            user.native_language = LanguageCode::new(code)?;
        }
        if let Some(code) = input.target_language {
            user.target_language = LanguageCode::new(code)?;
        }
        if let Some(goals) = input.learning_goals {
            user.learning_goals = validate_learning_goals(&goals)?;
        }
        if let Some(allow) = input.allow_learning_data_sharing {
            user.allow_learning_data_sharing = allow;
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}
