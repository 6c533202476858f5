//! Practice Record Entity
//!
//! One practice attempt on a vocabulary entry.

use chrono::{DateTime, Utc};
use kernel::id::{PracticeRecordId, VocabularyId};

#[derive(Debug, Clone)]
pub struct PracticeRecord {
    pub practice_id: PracticeRecordId,
    pub vocabulary_id: VocabularyId,
    pub practiced_at: DateTime<Utc>,
    /// Milliseconds until the answer, when measured
    pub response_time_ms: Option<i32>,
    pub success: bool,
    pub is_deleted: bool,
}

impl PracticeRecord {
    pub fn new(vocabulary_id: VocabularyId, success: bool, response_time_ms: Option<i32>) -> Self {
        Self {
            practice_id: PracticeRecordId::new(),
            vocabulary_id,
            practiced_at: Utc::now(),
            response_time_ms,
            success,
            is_deleted: false,
        }
    }
}
