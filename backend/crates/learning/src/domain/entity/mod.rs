//! Entity Module

pub mod mistake;
pub mod mistake_category;
pub mod practice_record;
pub mod study_session;
pub mod vocabulary;
