use serde::{Deserialize, Serialize};

/// Whether the learner has stopped making a mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum ImprovementStatus {
    #[default]
    NotImproved = 0,
    Improving = 1,
    Improved = 2,
}

impl ImprovementStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        use ImprovementStatus::*;
        match id {
            0 => Some(NotImproved),
            1 => Some(Improving),
            2 => Some(Improved),
            _ => None,
        }
    }
}
