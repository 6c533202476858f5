//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Every failure path returns the same `InvalidCredentials`.
    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AccountError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AccountError::InvalidCredentials)?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            self.config.burn_verification(&password);
            return Err(AccountError::InvalidCredentials);
        };

        if !self.config.hasher.verify(&password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        user.record_login(Utc::now());
        self.user_repo.update(&user).await?;

        let token = self
            .config
            .tokens
            .issue(user.user_id.into_uuid(), user.email.as_str())?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %token.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            access_token: token.access_token,
            expires_at: token.expires_at,
        })
    }
}
