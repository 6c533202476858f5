//! Mistake Use Cases

use std::sync::Arc;

use kernel::id::{MistakeCategoryId, MistakeId, UserId};

use crate::domain::entity::mistake::{EXPLANATION_MAX_LENGTH, MISTAKE_TEXT_MAX_LENGTH, Mistake};
use crate::domain::repository::{MistakeCategoryRepository, MistakeRepository};
use crate::domain::value_object::{
    improvement_status::ImprovementStatus,
    text::{optional_text, required_text},
};
use crate::error::{LearningError, LearningResult};

async fn load_mistake<M>(repo: &M, caller: &UserId, mistake_id: &MistakeId) -> LearningResult<Mistake>
where
    M: MistakeRepository,
{
    repo.find_by_id(mistake_id)
        .await?
        .filter(|mistake| mistake.user_id == *caller)
        .ok_or(LearningError::MistakeNotFound)
}

#[derive(Debug)]
pub struct RecordMistakeInput {
    pub category_id: MistakeCategoryId,
    pub original_text: String,
    pub corrected_text: String,
    pub explanation: Option<String>,
}

/// Record mistake use case
pub struct RecordMistakeUseCase<M, C>
where
    M: MistakeRepository,
    C: MistakeCategoryRepository,
{
    mistake_repo: Arc<M>,
    category_repo: Arc<C>,
}

impl<M, C> RecordMistakeUseCase<M, C>
where
    M: MistakeRepository,
    C: MistakeCategoryRepository,
{
    pub fn new(mistake_repo: Arc<M>, category_repo: Arc<C>) -> Self {
        Self {
            mistake_repo,
            category_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: RecordMistakeInput,
    ) -> LearningResult<Mistake> {
        let original_text =
            required_text("Original text", &input.original_text, MISTAKE_TEXT_MAX_LENGTH)?;
        let corrected_text =
            required_text("Corrected text", &input.corrected_text, MISTAKE_TEXT_MAX_LENGTH)?;
        let explanation = match input.explanation {
            Some(text) => optional_text("Explanation", &text, EXPLANATION_MAX_LENGTH)?,
            None => None,
        };

        if self.category_repo.find_by_id(&input.category_id).await?.is_none() {
            return Err(LearningError::CategoryNotFound);
        }

        let mistake = Mistake::new(
            *user_id,
            input.category_id,
            original_text,
            corrected_text,
            explanation,
        );
        self.mistake_repo.create(&mistake).await?;

        tracing::info!(
            user_id = %user_id,
            mistake_id = %mistake.mistake_id,
            category_id = %mistake.category_id,
            "Mistake recorded"
        );

        Ok(mistake)
    }
}

/// List mistakes use case
pub struct ListMistakesUseCase<M>
where
    M: MistakeRepository,
{
    repo: Arc<M>,
}

impl<M> ListMistakesUseCase<M>
where
    M: MistakeRepository,
{
    pub fn new(repo: Arc<M>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LearningResult<Vec<Mistake>> {
        self.repo.list_by_user(user_id).await
    }
}

/// Set improvement use case
pub struct SetImprovementUseCase<M>
where
    M: MistakeRepository,
{
    repo: Arc<M>,
}

impl<M> SetImprovementUseCase<M>
where
    M: MistakeRepository,
{
    pub fn new(repo: Arc<M>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        mistake_id: &MistakeId,
        improvement: ImprovementStatus,
    ) -> LearningResult<Mistake> {
        let mut mistake = load_mistake(self.repo.as_ref(), caller, mistake_id).await?;

        mistake.improvement = improvement;
        self.repo.update(&mistake).await?;

        tracing::info!(mistake_id = %mistake_id, improvement = ?improvement, "Mistake improvement set");

        Ok(mistake)
    }
}

/// Delete mistake use case
pub struct DeleteMistakeUseCase<M>
where
    M: MistakeRepository,
{
    repo: Arc<M>,
}

impl<M> DeleteMistakeUseCase<M>
where
    M: MistakeRepository,
{
    pub fn new(repo: Arc<M>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &UserId, mistake_id: &MistakeId) -> LearningResult<()> {
        load_mistake(self.repo.as_ref(), caller, mistake_id).await?;

        if !self.repo.soft_delete(mistake_id).await? {
            return Err(LearningError::MistakeNotFound);
        }

        tracing::info!(mistake_id = %mistake_id, "Mistake deleted");

        Ok(())
    }
}
