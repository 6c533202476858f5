//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{
    mistake::Mistake, mistake_category::MistakeCategory, practice_record::PracticeRecord,
    study_session::StudySession, vocabulary::Vocabulary,
};
use crate::domain::value_object::{
    improvement_status::ImprovementStatus, knowledge_level::KnowledgeLevel,
    session_type::SessionType, vocabulary_source::VocabularySource,
};

// ============================================================================
// Vocabulary
// ============================================================================

/// Add vocabulary request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVocabularyRequest {
    pub expression: String,
    pub translation: String,
    pub example_sentence: Option<String>,
    /// Code or numeric id, `manual` when absent
    #[serde(rename = "addedFrom", alias = "source")]
    pub source: Option<VocabularySource>,
    /// 1..=5, 1 when absent
    pub knowledge_level: Option<i64>,
}

/// Vocabulary update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditVocabularyRequest {
    pub expression: Option<String>,
    pub translation: Option<String>,
    pub example_sentence: Option<String>,
    pub knowledge_level: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyResponse {
    pub id: Uuid,
    pub expression: String,
    pub translation: String,
    pub example_sentence: Option<String>,
    #[serde(rename = "addedFrom")]
    pub source: VocabularySource,
    pub knowledge_level: KnowledgeLevel,
    pub created_at: DateTime<Utc>,
}

impl From<&Vocabulary> for VocabularyResponse {
    fn from(v: &Vocabulary) -> Self {
        Self {
            id: v.vocabulary_id.into_uuid(),
            expression: v.expression.clone(),
            translation: v.translation.clone(),
            example_sentence: v.example_sentence.clone(),
            source: v.source,
            knowledge_level: v.knowledge_level,
            created_at: v.created_at,
        }
    }
}

// ============================================================================
// Practice
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPracticeRequest {
    pub success: bool,
    pub response_time_ms: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeResponse {
    pub id: Uuid,
    pub vocabulary_id: Uuid,
    pub practiced_at: DateTime<Utc>,
    pub response_time_ms: Option<i32>,
    pub success: bool,
}

impl From<&PracticeRecord> for PracticeResponse {
    fn from(r: &PracticeRecord) -> Self {
        Self {
            id: r.practice_id.into_uuid(),
            vocabulary_id: r.vocabulary_id.into_uuid(),
            practiced_at: r.practiced_at,
            response_time_ms: r.response_time_ms,
            success: r.success,
        }
    }
}

// ============================================================================
// Study Sessions
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// `conversation` when absent
    pub session_type: Option<SessionType>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub session_type: SessionType,
    pub title: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<&StudySession> for SessionResponse {
    fn from(s: &StudySession) -> Self {
        Self {
            id: s.session_id.into_uuid(),
            session_type: s.session_type,
            title: s.title.clone(),
            started_at: s.started_at,
            ended_at: s.ended_at,
        }
    }
}

// ============================================================================
// Mistakes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMistakeRequest {
    pub category_id: Uuid,
    pub original_text: String,
    pub corrected_text: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetImprovementRequest {
    pub improvement: ImprovementStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub original_text: String,
    pub corrected_text: String,
    pub explanation: Option<String>,
    pub improvement: ImprovementStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Mistake> for MistakeResponse {
    fn from(m: &Mistake) -> Self {
        Self {
            id: m.mistake_id.into_uuid(),
            category_id: m.category_id.into_uuid(),
            original_text: m.original_text.clone(),
            corrected_text: m.corrected_text.clone(),
            explanation: m.explanation.clone(),
            improvement: m.improvement,
            created_at: m.created_at,
        }
    }
}

// ============================================================================
// Mistake Categories
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&MistakeCategory> for CategoryResponse {
    fn from(c: &MistakeCategory) -> Self {
        Self {
            id: c.category_id.into_uuid(),
            name: c.name.clone(),
            created_at: c.created_at,
        }
    }
}
