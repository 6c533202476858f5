use serde::{Deserialize, Serialize};

/// Kind of study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum SessionType {
    #[default]
    Conversation = 0,
    PlacementTest = 1,
}

impl SessionType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(SessionType::Conversation),
            1 => Some(SessionType::PlacementTest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::from_str::<SessionType>("\"placementTest\"").unwrap(),
            SessionType::PlacementTest
        );
        assert_eq!(SessionType::from_id(1), Some(SessionType::PlacementTest));
        assert_eq!(SessionType::from_id(2), None);
    }
}
