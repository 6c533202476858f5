//! Practice History Use Cases

use std::sync::Arc;

use kernel::id::{UserId, VocabularyId};

use crate::application::config::LearningConfig;
use crate::application::vocabulary::load_vocabulary;
use crate::domain::entity::practice_record::PracticeRecord;
use crate::domain::repository::{PracticeRepository, VocabularyRepository};
use crate::error::{LearningError, LearningResult};

#[derive(Debug)]
pub struct RecordPracticeInput {
    pub success: bool,
    pub response_time_ms: Option<i64>,
}

/// Record practice use case
pub struct RecordPracticeUseCase<V, P>
where
    V: VocabularyRepository,
    P: PracticeRepository,
{
    vocabulary_repo: Arc<V>,
    practice_repo: Arc<P>,
    config: Arc<LearningConfig>,
}

impl<V, P> RecordPracticeUseCase<V, P>
where
    V: VocabularyRepository,
    P: PracticeRepository,
{
    pub fn new(vocabulary_repo: Arc<V>, practice_repo: Arc<P>, config: Arc<LearningConfig>) -> Self {
        Self {
            vocabulary_repo,
            practice_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        vocabulary_id: &VocabularyId,
        input: RecordPracticeInput,
    ) -> LearningResult<PracticeRecord> {
        let response_time_ms = input
            .response_time_ms
            .map(|ms| {
                i32::try_from(ms).ok().filter(|ms| *ms >= 0).ok_or_else(|| {
                    LearningError::Validation(
                        "Response time must be a non-negative number of milliseconds".into(),
                    )
                })
            })
            .transpose()?;

        load_vocabulary(
            self.vocabulary_repo.as_ref(),
            &self.config,
            caller,
            vocabulary_id,
        )
        .await?;

        let record = PracticeRecord::new(*vocabulary_id, input.success, response_time_ms);
        self.practice_repo.create(&record).await?;

        tracing::info!(
            vocabulary_id = %vocabulary_id,
            success = record.success,
            "Practice recorded"
        );

        Ok(record)
    }
}

/// Practice history use case
pub struct PracticeHistoryUseCase<V, P>
where
    V: VocabularyRepository,
    P: PracticeRepository,
{
    vocabulary_repo: Arc<V>,
    practice_repo: Arc<P>,
    config: Arc<LearningConfig>,
}

impl<V, P> PracticeHistoryUseCase<V, P>
where
    V: VocabularyRepository,
    P: PracticeRepository,
{
    pub fn new(vocabulary_repo: Arc<V>, practice_repo: Arc<P>, config: Arc<LearningConfig>) -> Self {
        Self {
            vocabulary_repo,
            practice_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        vocabulary_id: &VocabularyId,
    ) -> LearningResult<Vec<PracticeRecord>> {
        load_vocabulary(
            self.vocabulary_repo.as_ref(),
            &self.config,
            caller,
            vocabulary_id,
        )
        .await?;

        self.practice_repo.list_by_vocabulary(vocabulary_id).await
    }
}
