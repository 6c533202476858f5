//! Mistake Entity
//!
//! A correction the learner received, filed under a category.

use chrono::{DateTime, Utc};
use kernel::id::{MistakeCategoryId, MistakeId, UserId};

use crate::domain::value_object::improvement_status::ImprovementStatus;

pub const MISTAKE_TEXT_MAX_LENGTH: usize = 500;
pub const EXPLANATION_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone)]
pub struct Mistake {
    pub mistake_id: MistakeId,
    pub user_id: UserId,
    pub category_id: MistakeCategoryId,
    pub original_text: String,
    pub corrected_text: String,
    pub explanation: Option<String>,
    pub improvement: ImprovementStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Mistake {
    pub fn new(
        user_id: UserId,
        category_id: MistakeCategoryId,
        original_text: String,
        corrected_text: String,
        explanation: Option<String>,
    ) -> Self {
        Self {
            mistake_id: MistakeId::new(),
            user_id,
            category_id,
            original_text,
            corrected_text,
            explanation,
            improvement: ImprovementStatus::default(),
            is_deleted: false,
            created_at: Utc::now(),
        }
    }
}
