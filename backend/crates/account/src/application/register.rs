//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::{NewUserProfile, User, validate_learning_goals};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, language_code::LanguageCode, proficiency_level::ProficiencyLevel,
};
use crate::error::{AccountError, AccountResult};

/// Register input. Absent profile fields take the account defaults.
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub level: Option<String>,
    pub native_language: Option<String>,
    pub target_language: Option<String>,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: Option<bool>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        let email = Email::new(&input.email)?;
        let password = ClearTextPassword::new(input.password)?;
        let profile = Self::profile(
            input.level,
            input.native_language,
            input.target_language,
            input.learning_goals,
            input.allow_learning_data_sharing,
        )?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self.config.hasher.hash(&password)?;
        let user = User::new(email, password_hash, profile);

        // The partial unique index still catches a concurrent duplicate.
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(user)
    }

    fn profile(
        level: Option<String>,
        native_language: Option<String>,
        target_language: Option<String>,
        learning_goals: Option<String>,
        allow_learning_data_sharing: Option<bool>,
    ) -> AccountResult<NewUserProfile> {
        let defaults = NewUserProfile::default();

        Ok(NewUserProfile {
            level: match level {
                Some(level) => level.parse::<ProficiencyLevel>()?,
                None => defaults.level,
            },
            native_language: match native_language {
                Some(code) => LanguageCode::new(code)?,
                None => defaults.native_language,
            },
            target_language: match target_language {
                Some(code) => LanguageCode::new(code)?,
                None => defaults.target_language,
            },
            learning_goals: match learning_goals {
                Some(goals) => validate_learning_goals(&goals)?,
                None => None,
            },
            allow_learning_data_sharing: allow_learning_data_sharing
                .unwrap_or(defaults.allow_learning_data_sharing),
        })
    }
}
