use kernel::error::app_error::{AppResult, OptionExt, ResultExt};
use kernel::error::kind::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How well the learner knows an entry, 1 (unknown) to 5 (mastered).
///
/// Requests carry the number; responses carry the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum KnowledgeLevel {
    #[default]
    Unknown = 1,
    Beginner = 2,
    Intermediate = 3,
    Advanced = 4,
    Mastered = 5,
}

impl KnowledgeLevel {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use KnowledgeLevel::*;
        match self {
            Unknown => "unknown",
            Beginner => "beginner",
            Intermediate => "intermediate",
            Advanced => "advanced",
            Mastered => "mastered",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        use KnowledgeLevel::*;
        match id {
            1 => Some(Unknown),
            2 => Some(Beginner),
            3 => Some(Intermediate),
            4 => Some(Advanced),
            5 => Some(Mastered),
            _ => None,
        }
    }

    /// Parse a client-supplied level
    pub fn from_level(level: i64) -> AppResult<Self> {
        const OUT_OF_RANGE: &str = "Knowledge level must be between 1 and 5";
        let id = i16::try_from(level).map_app_err(ErrorKind::BadRequest, OUT_OF_RANGE)?;
        Self::from_id(id).ok_or_app_err(ErrorKind::BadRequest, OUT_OF_RANGE)
    }
}

impl fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
