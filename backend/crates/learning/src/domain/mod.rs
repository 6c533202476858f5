//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    mistake::Mistake, mistake_category::MistakeCategory, practice_record::PracticeRecord,
    study_session::StudySession, vocabulary::Vocabulary,
};
pub use repository::{
    LearningRepository, MistakeCategoryRepository, MistakeRepository, PracticeRepository,
    StudySessionRepository, VocabularyRepository,
};
