//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{user::User, user_settings::UserSettings};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// CEFR code, A1 when absent
    pub level: Option<String>,
    pub native_language: Option<String>,
    pub target_language: Option<String>,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: Option<bool>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    pub level: Option<String>,
    pub native_language: Option<String>,
    pub target_language: Option<String>,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: Option<bool>,
}

/// Public user view. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub level: String,
    pub native_language: String,
    pub target_language: String,
    pub learning_goals: Option<String>,
    pub allow_learning_data_sharing: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            level: user.level.code().to_string(),
            native_language: user.native_language.as_str().to_string(),
            target_language: user.target_language.as_str().to_string(),
            learning_goals: user.learning_goals.clone(),
            allow_learning_data_sharing: user.allow_learning_data_sharing,
            last_login_at: user.last_login_at,
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Settings update. Absent fields are left unchanged, blank text clears.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub tts_voice: Option<String>,
    pub stt_language: Option<String>,
    pub llm_style: Option<String>,
    pub response_speed: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub tts_voice: Option<String>,
    pub stt_language: Option<String>,
    pub llm_style: Option<String>,
    pub response_speed: Option<u8>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserSettings> for SettingsResponse {
    fn from(settings: &UserSettings) -> Self {
        Self {
            tts_voice: settings.tts_voice.clone(),
            stt_language: settings.stt_language.clone(),
            llm_style: settings.llm_style.clone(),
            response_speed: settings.response_speed.map(|s| s.value()),
            updated_at: settings.updated_at,
        }
    }
}
