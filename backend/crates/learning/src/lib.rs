//! Learning Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Personal vocabulary with practice history
//! - Study sessions (conversation, placement test)
//! - Mistakes filed under a shared category catalogue
//!
//! ## Deletion Model
//! Everything except categories is tombstoned. [`PgLearningRepository`]
//! implements [`account::UserDataCascade`] so account deletion reaches the
//! learning tables.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::LearningConfig;
pub use error::{LearningError, LearningResult};
pub use infra::postgres::PgLearningRepository;
pub use presentation::router::{learning_router, learning_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgLearningRepository as LearningStore;
}
