//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every other crate agrees on:
//! - Common error types and result aliases
//! - Typed entity identifiers
//!
//! Only things with one meaning across the account and learning contexts
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
