//! Mistake Category Entity
//!
//! Shared across users. Not soft-deletable; removal is refused while any
//! mistake row still references the category.

use chrono::{DateTime, Utc};
use kernel::id::MistakeCategoryId;

pub const CATEGORY_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct MistakeCategory {
    pub category_id: MistakeCategoryId,
    /// Unique
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl MistakeCategory {
    pub fn new(name: String) -> Self {
        Self {
            category_id: MistakeCategoryId::new(),
            name,
            created_at: Utc::now(),
        }
    }
}
