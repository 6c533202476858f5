//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every read here sees live rows only.

use kernel::id::UserId;

use crate::domain::entity::{user::User, user_settings::UserSettings};
use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A live user with the same email yields `EmailTaken`.
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find a live user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find a live user by exact email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check whether a live user owns this email
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// Update profile fields and last login of a live user
    async fn update(&self, user: &User) -> AccountResult<()>;

    /// Set the tombstone flag. Returns false when no live user matched.
    async fn soft_delete(&self, user_id: &UserId) -> AccountResult<bool>;
}

/// User settings repository trait
#[trait_variant::make(UserSettingsRepository: Send)]
pub trait LocalUserSettingsRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<UserSettings>>;

    /// Insert or replace the user's settings row
    async fn upsert(&self, settings: &UserSettings) -> AccountResult<()>;

    /// Physically remove the settings row, if any
    async fn delete_by_user_id(&self, user_id: &UserId) -> AccountResult<u64>;
}

/// Port through which account deletion reaches data owned elsewhere.
#[trait_variant::make(UserDataCascade: Send)]
pub trait LocalUserDataCascade {
    /// Tombstone everything the user owns. Returns the number of rows flagged.
    async fn tombstone_user_data(&self, user_id: &UserId) -> AccountResult<u64>;
}

/// Read-only view other crates use to tell whether a token's subject still exists.
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// True while the user has not been deleted
    async fn is_live(&self, user_id: &UserId) -> AccountResult<bool>;
}
