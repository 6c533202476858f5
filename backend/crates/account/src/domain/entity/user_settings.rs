//! User Settings Entity
//!
//! Per-user assistant preferences. At most one row per user; removed
//! physically together with the account.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{UserId, UserSettingsId};

use crate::domain::value_object::response_speed::ResponseSpeed;

pub const TTS_VOICE_MAX_LENGTH: usize = 50;
pub const STT_LANGUAGE_MAX_LENGTH: usize = 10;
pub const LLM_STYLE_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone)]
pub struct UserSettings {
    pub settings_id: UserSettingsId,
    pub user_id: UserId,
    pub tts_voice: Option<String>,
    pub stt_language: Option<String>,
    pub llm_style: Option<String>,
    pub response_speed: Option<ResponseSpeed>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Empty settings for a user who never saved any
    pub fn empty(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            settings_id: UserSettingsId::new(),
            user_id,
            tts_voice: None,
            stt_language: None,
            llm_style: None,
            response_speed: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validate an optional short text setting. Blank clears it.
pub fn setting_text(field: &str, raw: &str, max: usize) -> AppResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_text() {
        assert_eq!(setting_text("ttsVoice", "", 5).unwrap(), None);
        assert_eq!(
            setting_text("ttsVoice", "nova", 5).unwrap(),
            Some("nova".to_string())
        );
        assert!(setting_text("ttsVoice", "abcdef", 5).is_err());
    }
}
