//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_account;
pub mod login;
pub mod profile;
pub mod register;
pub mod settings;

// Re-exports
pub use config::AccountConfig;
pub use delete_account::DeleteAccountUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{EditProfileInput, EditProfileUseCase, GetProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use settings::{GetSettingsUseCase, UpdateSettingsInput, UpdateSettingsUseCase};
