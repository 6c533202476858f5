//! Bounded free-text fields

use kernel::error::app_error::{AppError, AppResult};

/// Trimmed, non-empty text of at most `max` characters.
pub fn required_text(field: &str, raw: &str, max: usize) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{} cannot be empty", field)));
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Like [`required_text`], but blank input means "absent".
pub fn optional_text(field: &str, raw: &str, max: usize) -> AppResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    check_length(field, trimmed, max)?;
    Ok(Some(trimmed.to_string()))
}

fn check_length(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("expression", " alma ", 10).unwrap(), "alma");
        assert!(required_text("expression", "   ", 10).is_err());
        assert!(required_text("expression", "abcdefghijk", 10).is_err());
        // Counted in characters, not bytes
        assert!(required_text("expression", "ááááá", 5).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("title", "", 10).unwrap(), None);
        assert_eq!(
            optional_text("title", "Warm-up", 10).unwrap(),
            Some("Warm-up".to_string())
        );
        assert!(optional_text("title", "abcdefghijk", 10).is_err());
    }
}
