//! Settings Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user_settings::{
    self, LLM_STYLE_MAX_LENGTH, STT_LANGUAGE_MAX_LENGTH, TTS_VOICE_MAX_LENGTH, UserSettings,
};
use crate::domain::repository::{UserRepository, UserSettingsRepository};
use crate::domain::value_object::response_speed::ResponseSpeed;
use crate::error::{AccountError, AccountResult};

/// Get settings use case
pub struct GetSettingsUseCase<U, S>
where
    U: UserRepository,
    S: UserSettingsRepository,
{
    user_repo: Arc<U>,
    settings_repo: Arc<S>,
}

impl<U, S> GetSettingsUseCase<U, S>
where
    U: UserRepository,
    S: UserSettingsRepository,
{
    pub fn new(user_repo: Arc<U>, settings_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            settings_repo,
        }
    }

    /// Stored settings, or an empty set when none were saved yet.
    pub async fn execute(&self, user_id: &UserId) -> AccountResult<UserSettings> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound);
        }

        Ok(self
            .settings_repo
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| UserSettings::empty(*user_id)))
    }
}

/// Settings changes with presence semantics; blank text clears a field.
#[derive(Debug, Default)]
pub struct UpdateSettingsInput {
    pub tts_voice: Option<String>,
    pub stt_language: Option<String>,
    pub llm_style: Option<String>,
    pub response_speed: Option<i64>,
}

/// Update settings use case
pub struct UpdateSettingsUseCase<U, S>
where
    U: UserRepository,
    S: UserSettingsRepository,
{
    user_repo: Arc<U>,
    settings_repo: Arc<S>,
}

impl<U, S> UpdateSettingsUseCase<U, S>
where
    U: UserRepository,
    S: UserSettingsRepository,
{
    pub fn new(user_repo: Arc<U>, settings_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            settings_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: UpdateSettingsInput,
    ) -> AccountResult<UserSettings> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound);
        }

        let mut settings = self
            .settings_repo
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| UserSettings::empty(*user_id));

        if let Some(voice) = input.tts_voice {
            settings.tts_voice =
                user_settings::setting_text("ttsVoice", &voice, TTS_VOICE_MAX_LENGTH)?;
        }
        if let Some(language) = input.stt_language {
            settings.stt_language =
                user_settings::setting_text("sttLanguage", &language, STT_LANGUAGE_MAX_LENGTH)?;
        }
        if let Some(style) = input.llm_style {
            settings.llm_style =
                user_settings::setting_text("llmStyle", &style, LLM_STYLE_MAX_LENGTH)?;
        }
        if let Some(speed) = input.response_speed {
            settings.response_speed = Some(ResponseSpeed::new(speed)?);
        }
        settings.touch();

        self.settings_repo.upsert(&settings).await?;

        tracing::info!(user_id = %user_id, "Settings updated");

        Ok(settings)
    }
}
