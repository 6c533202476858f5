//! Study Session Entity

use chrono::{DateTime, Utc};
use kernel::id::{StudySessionId, UserId};

use crate::domain::value_object::session_type::SessionType;

pub const TITLE_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone)]
pub struct StudySession {
    pub session_id: StudySessionId,
    pub user_id: UserId,
    pub session_type: SessionType,
    pub title: Option<String>,
    pub started_at: DateTime<Utc>,
    /// Set once; an ended session cannot be ended again
    pub ended_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl StudySession {
    pub fn start(user_id: UserId, session_type: SessionType, title: Option<String>) -> Self {
        Self {
            session_id: StudySessionId::new(),
            user_id,
            session_type,
            title,
            started_at: Utc::now(),
            ended_at: None,
            is_deleted: false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}
