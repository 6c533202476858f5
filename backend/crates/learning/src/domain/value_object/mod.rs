//! Value Object Module

pub mod improvement_status;
pub mod knowledge_level;
pub mod session_type;
pub mod text;
pub mod vocabulary_source;
