//! Vocabulary Use Cases

use std::sync::Arc;

use kernel::id::{UserId, VocabularyId};

use crate::application::config::LearningConfig;
use crate::domain::entity::vocabulary::{
    EXAMPLE_SENTENCE_MAX_LENGTH, EXPRESSION_MAX_LENGTH, TRANSLATION_MAX_LENGTH, Vocabulary,
};
use crate::domain::repository::VocabularyRepository;
use crate::domain::value_object::{
    knowledge_level::KnowledgeLevel,
    text::{optional_text, required_text},
    vocabulary_source::VocabularySource,
};
use crate::error::{LearningError, LearningResult};

/// Load a live entry the caller may act on.
///
/// A foreign entry is `VocabularyNotFound` when ownership is enforced and a
/// logged warning otherwise.
pub(crate) async fn load_vocabulary<V>(
    repo: &V,
    config: &LearningConfig,
    caller: &UserId,
    vocabulary_id: &VocabularyId,
) -> LearningResult<Vocabulary>
where
    V: VocabularyRepository,
{
    let vocabulary = repo
        .find_by_id(vocabulary_id)
        .await?
        .ok_or(LearningError::VocabularyNotFound)?;

    if vocabulary.user_id != *caller {
        tracing::warn!(
            caller = %caller,
            owner = %vocabulary.user_id,
            vocabulary_id = %vocabulary_id,
            enforced = config.enforce_ownership,
            "Vocabulary ownership mismatch"
        );
        if config.enforce_ownership {
            return Err(LearningError::VocabularyNotFound);
        }
    }

    Ok(vocabulary)
}

/// New entry fields
#[derive(Debug)]
pub struct AddVocabularyInput {
    pub expression: String,
    pub translation: String,
    pub example_sentence: Option<String>,
    pub source: Option<VocabularySource>,
    pub knowledge_level: Option<i64>,
}

/// Add vocabulary use case
pub struct AddVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    repo: Arc<V>,
}

impl<V> AddVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    pub fn new(repo: Arc<V>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: AddVocabularyInput,
    ) -> LearningResult<Vocabulary> {
        let expression = required_text("Expression", &input.expression, EXPRESSION_MAX_LENGTH)?;
        let translation =
            required_text("Translation", &input.translation, TRANSLATION_MAX_LENGTH)?;
        let example_sentence = match input.example_sentence {
            Some(s) => optional_text("Example sentence", &s, EXAMPLE_SENTENCE_MAX_LENGTH)?,
            None => None,
        };
        let knowledge_level = match input.knowledge_level {
            Some(level) => KnowledgeLevel::from_level(level)?,
            None => KnowledgeLevel::default(),
        };

        let vocabulary = Vocabulary::new(
            *user_id,
            expression,
            translation,
            example_sentence,
            input.source.unwrap_or_default(),
            knowledge_level,
        );
        self.repo.create(&vocabulary).await?;

        tracing::info!(
            user_id = %user_id,
            vocabulary_id = %vocabulary.vocabulary_id,
            "Vocabulary added"
        );

        Ok(vocabulary)
    }
}

/// List vocabulary use case
pub struct ListVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    repo: Arc<V>,
}

impl<V> ListVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    pub fn new(repo: Arc<V>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LearningResult<Vec<Vocabulary>> {
        self.repo.list_by_user(user_id).await
    }
}

/// Entry changes. `None` leaves a field unchanged; a present but blank
/// example sentence clears it.
#[derive(Debug, Default)]
pub struct EditVocabularyInput {
    pub expression: Option<String>,
    pub translation: Option<String>,
    pub example_sentence: Option<String>,
    pub knowledge_level: Option<i64>,
}

/// Edit vocabulary use case
pub struct EditVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    repo: Arc<V>,
    config: Arc<LearningConfig>,
}

impl<V> EditVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    pub fn new(repo: Arc<V>, config: Arc<LearningConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        vocabulary_id: &VocabularyId,
        input: EditVocabularyInput,
    ) -> LearningResult<Vocabulary> {
        let mut vocabulary =
            load_vocabulary(self.repo.as_ref(), &self.config, caller, vocabulary_id).await?;

        if let Some(expression) = input.expression {
            vocabulary.expression =
                required_text("Expression", &expression, EXPRESSION_MAX_LENGTH)?;
        }
        if let Some(translation) = input.translation {
            vocabulary.translation =
                required_text("Translation", &translation, TRANSLATION_MAX_LENGTH)?;
        }
        if let Some(example) = input.example_sentence {
            vocabulary.example_sentence =
                optional_text("Example sentence", &example, EXAMPLE_SENTENCE_MAX_LENGTH)?;
        }
        if let Some(level) = input.knowledge_level {
            vocabulary.knowledge_level = KnowledgeLevel::from_level(level)?;
        }

        self.repo.update(&vocabulary).await?;

        tracing::info!(vocabulary_id = %vocabulary_id, "Vocabulary updated");

        Ok(vocabulary)
    }
}

/// Delete vocabulary use case
pub struct DeleteVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    repo: Arc<V>,
    config: Arc<LearningConfig>,
}

impl<V> DeleteVocabularyUseCase<V>
where
    V: VocabularyRepository,
{
    pub fn new(repo: Arc<V>, config: Arc<LearningConfig>) -> Self {
        Self { repo, config }
    }

    /// Tombstones the entry together with its practice history
    pub async fn execute(&self, caller: &UserId, vocabulary_id: &VocabularyId) -> LearningResult<()> {
        load_vocabulary(self.repo.as_ref(), &self.config, caller, vocabulary_id).await?;

        if !self.repo.soft_delete(vocabulary_id).await? {
            return Err(LearningError::VocabularyNotFound);
        }

        tracing::info!(vocabulary_id = %vocabulary_id, "Vocabulary deleted");

        Ok(())
    }
}
