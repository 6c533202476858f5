use kernel::error::app_error::{AppError, AppResult};

/// Assistant response speed preference, 1 (slowest) to 5 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSpeed(u8);

impl ResponseSpeed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> AppResult<Self> {
        if !(Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            return Err(AppError::bad_request(format!(
                "Response speed must be between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(ResponseSpeed::new(0).is_err());
        assert_eq!(ResponseSpeed::new(1).unwrap().value(), 1);
        assert_eq!(ResponseSpeed::new(5).unwrap().value(), 5);
        assert!(ResponseSpeed::new(6).is_err());
    }
}
