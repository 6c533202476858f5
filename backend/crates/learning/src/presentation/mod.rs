//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod caller;
pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LearningAppState;
pub use router::{learning_router, learning_router_generic};
