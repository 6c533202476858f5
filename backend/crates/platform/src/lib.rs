//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT)
//! - Bearer header extraction and the authenticated-caller extractor

pub mod bearer;
pub mod password;
pub mod token;
