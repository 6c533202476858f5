//! Value Object Module

pub mod email;
pub mod language_code;
pub mod proficiency_level;
pub mod response_speed;
