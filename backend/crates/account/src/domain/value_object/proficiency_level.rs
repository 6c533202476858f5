use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kernel::error::app_error::AppError;

/// CEFR proficiency level, persisted as 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum ProficiencyLevel {
    #[default]
    A1 = 1,
    A2 = 2,
    B1 = 3,
    B2 = 4,
    C1 = 5,
    C2 = 6,
}

impl ProficiencyLevel {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use ProficiencyLevel::*;
        match self {
            A1 => "A1",
            A2 => "A2",
            B1 => "B1",
            B2 => "B2",
            C1 => "C1",
            C2 => "C2",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        use ProficiencyLevel::*;
        match id {
            1 => Some(A1),
            2 => Some(A2),
            3 => Some(B1),
            4 => Some(B2),
            5 => Some(C1),
            6 => Some(C2),
            _ => None,
        }
    }
}

impl FromStr for ProficiencyLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ProficiencyLevel::*;
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(A1),
            "A2" => Ok(A2),
            "B1" => Ok(B1),
            "B2" => Ok(B2),
            "C1" => Ok(C1),
            "C2" => Ok(C2),
            _ => Err(AppError::bad_request(format!(
                "Invalid proficiency level '{}': expected A1..C2",
                s
            ))),
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for id in 1..=6 {
            assert_eq!(ProficiencyLevel::from_id(id).unwrap().id(), id);
        }
        assert_eq!(ProficiencyLevel::from_id(0), None);
        assert_eq!(ProficiencyLevel::from_id(7), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("b2".parse::<ProficiencyLevel>().unwrap(), ProficiencyLevel::B2);
        assert!("D1".parse::<ProficiencyLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&ProficiencyLevel::C1).unwrap(), "\"C1\"");
    }
}
