//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Reads never return tombstoned rows.

use account::UserDirectory;
use kernel::id::{MistakeCategoryId, MistakeId, StudySessionId, UserId, VocabularyId};

use crate::domain::entity::{
    mistake::Mistake, mistake_category::MistakeCategory, practice_record::PracticeRecord,
    study_session::StudySession, vocabulary::Vocabulary,
};
use crate::error::LearningResult;

/// Vocabulary repository trait
#[trait_variant::make(VocabularyRepository: Send)]
pub trait LocalVocabularyRepository {
    async fn create(&self, vocabulary: &Vocabulary) -> LearningResult<()>;

    async fn find_by_id(&self, vocabulary_id: &VocabularyId) -> LearningResult<Option<Vocabulary>>;

    /// Live entries of one user, newest first
    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<Vocabulary>>;

    async fn update(&self, vocabulary: &Vocabulary) -> LearningResult<()>;

    /// Tombstone the entry and its practice records in one transaction.
    /// Returns false when no live entry matched.
    async fn soft_delete(&self, vocabulary_id: &VocabularyId) -> LearningResult<bool>;
}

/// Practice history repository trait
#[trait_variant::make(PracticeRepository: Send)]
pub trait LocalPracticeRepository {
    async fn create(&self, record: &PracticeRecord) -> LearningResult<()>;

    /// Live records of one entry, newest first
    async fn list_by_vocabulary(
        &self,
        vocabulary_id: &VocabularyId,
    ) -> LearningResult<Vec<PracticeRecord>>;
}

/// Study session repository trait
#[trait_variant::make(StudySessionRepository: Send)]
pub trait LocalStudySessionRepository {
    async fn create(&self, session: &StudySession) -> LearningResult<()>;

    async fn find_by_id(&self, session_id: &StudySessionId) -> LearningResult<Option<StudySession>>;

    /// Live sessions of one user, most recently started first
    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<StudySession>>;

    async fn update(&self, session: &StudySession) -> LearningResult<()>;

    async fn soft_delete(&self, session_id: &StudySessionId) -> LearningResult<bool>;
}

/// Mistake repository trait
#[trait_variant::make(MistakeRepository: Send)]
pub trait LocalMistakeRepository {
    /// Unknown category yields `CategoryNotFound`
    async fn create(&self, mistake: &Mistake) -> LearningResult<()>;

    async fn find_by_id(&self, mistake_id: &MistakeId) -> LearningResult<Option<Mistake>>;

    /// Live mistakes of one user, newest first
    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<Mistake>>;

    async fn update(&self, mistake: &Mistake) -> LearningResult<()>;

    async fn soft_delete(&self, mistake_id: &MistakeId) -> LearningResult<bool>;
}

/// Mistake category repository trait
#[trait_variant::make(MistakeCategoryRepository: Send)]
pub trait LocalMistakeCategoryRepository {
    /// Duplicate name yields `CategoryNameTaken`
    async fn create(&self, category: &MistakeCategory) -> LearningResult<()>;

    async fn find_by_id(
        &self,
        category_id: &MistakeCategoryId,
    ) -> LearningResult<Option<MistakeCategory>>;

    /// All categories, by name
    async fn list(&self) -> LearningResult<Vec<MistakeCategory>>;

    /// Physical delete. `CategoryInUse` while any mistake row (tombstoned
    /// or not) references it; false when absent.
    async fn delete(&self, category_id: &MistakeCategoryId) -> LearningResult<bool>;
}

/// Everything the learning router needs from one store
pub trait LearningRepository:
    VocabularyRepository
    + PracticeRepository
    + StudySessionRepository
    + MistakeRepository
    + MistakeCategoryRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> LearningRepository for T where
    T: VocabularyRepository
        + PracticeRepository
        + StudySessionRepository
        + MistakeRepository
        + MistakeCategoryRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Account liveness lookup shared by every learning route
pub trait CallerDirectory: UserDirectory + Clone + Send + Sync + 'static {}

impl<T> CallerDirectory for T where T: UserDirectory + Clone + Send + Sync + 'static {}
