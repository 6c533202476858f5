//! User Entity
//!
//! Account profile plus the credential digest. The digest never leaves the
//! crate through a view.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{
    email::Email, language_code::LanguageCode, proficiency_level::ProficiencyLevel,
};

/// Maximum learning goals length
pub const LEARNING_GOALS_MAX_LENGTH: usize = 500;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique among live users
    pub email: Email,
    pub password_hash: HashedPassword,
    pub level: ProficiencyLevel,
    pub native_language: LanguageCode,
    pub target_language: LanguageCode,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: bool,
    /// Tombstone flag; terminal once set
    pub is_deleted: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Profile fields chosen at registration
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub level: ProficiencyLevel,
    pub native_language: LanguageCode,
    pub target_language: LanguageCode,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: bool,
}

impl Default for NewUserProfile {
    fn default() -> Self {
        Self {
            level: ProficiencyLevel::default(),
            native_language: LanguageCode::default_native(),
            target_language: LanguageCode::default_target(),
            learning_goals: None,
            allow_learning_data_sharing: false,
        }
    }
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_hash: HashedPassword, profile: NewUserProfile) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            level: profile.level,
            native_language: profile.native_language,
            target_language: profile.target_language,
            learning_goals: profile.learning_goals,
            allow_learning_data_sharing: profile.allow_learning_data_sharing,
            is_deleted: false,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    /// Record successful login
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }
}

/// Validate free-text learning goals. Blank input means "no goals".
pub fn validate_learning_goals(raw: &str) -> AppResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > LEARNING_GOALS_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "Learning goals must be at most {} characters",
            LEARNING_GOALS_MAX_LENGTH
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            Email::new("a@x.io").unwrap(),
            HashedPassword::from_stored("$argon2id$stub"),
            NewUserProfile::default(),
        );
        assert_eq!(user.level, ProficiencyLevel::A1);
        assert_eq!(user.native_language.as_str(), "hu");
        assert_eq!(user.target_language.as_str(), "en");
        assert!(!user.allow_learning_data_sharing);
        assert!(!user.is_deleted);
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_learning_goals() {
        assert_eq!(validate_learning_goals("  ").unwrap(), None);
        assert_eq!(
            validate_learning_goals(" pass B2 ").unwrap(),
            Some("pass B2".to_string())
        );
        assert!(validate_learning_goals(&"x".repeat(LEARNING_GOALS_MAX_LENGTH + 1)).is_err());
    }
}
