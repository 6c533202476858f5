//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod mistake;
pub mod mistake_category;
pub mod practice;
pub mod study_session;
pub mod vocabulary;

// Re-exports
pub use config::LearningConfig;
pub use mistake::{
    DeleteMistakeUseCase, ListMistakesUseCase, RecordMistakeInput, RecordMistakeUseCase,
    SetImprovementUseCase,
};
pub use mistake_category::{CreateCategoryUseCase, DeleteCategoryUseCase, ListCategoriesUseCase};
pub use practice::{PracticeHistoryUseCase, RecordPracticeInput, RecordPracticeUseCase};
pub use study_session::{
    DeleteSessionUseCase, EndSessionUseCase, ListSessionsUseCase, StartSessionInput,
    StartSessionUseCase,
};
pub use vocabulary::{
    AddVocabularyInput, AddVocabularyUseCase, DeleteVocabularyUseCase, EditVocabularyInput,
    EditVocabularyUseCase, ListVocabularyUseCase,
};
