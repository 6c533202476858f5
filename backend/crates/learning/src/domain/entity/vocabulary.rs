//! Vocabulary Entity

use chrono::{DateTime, Utc};
use kernel::id::{UserId, VocabularyId};

use crate::domain::value_object::{
    knowledge_level::KnowledgeLevel, vocabulary_source::VocabularySource,
};

pub const EXPRESSION_MAX_LENGTH: usize = 100;
pub const TRANSLATION_MAX_LENGTH: usize = 100;
pub const EXAMPLE_SENTENCE_MAX_LENGTH: usize = 255;

/// A word or phrase the user is learning
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub vocabulary_id: VocabularyId,
    /// Owner
    pub user_id: UserId,
    pub expression: String,
    pub translation: String,
    pub example_sentence: Option<String>,
    pub source: VocabularySource,
    pub knowledge_level: KnowledgeLevel,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Vocabulary {
    pub fn new(
        user_id: UserId,
        expression: String,
        translation: String,
        example_sentence: Option<String>,
        source: VocabularySource,
        knowledge_level: KnowledgeLevel,
    ) -> Self {
        Self {
            vocabulary_id: VocabularyId::new(),
            user_id,
            expression,
            translation,
            example_sentence,
            source,
            knowledge_level,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }
}
