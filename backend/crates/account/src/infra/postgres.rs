//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{UserId, UserSettingsId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{user::User, user_settings::UserSettings};
use crate::domain::repository::{UserDirectory, UserRepository, UserSettingsRepository};
use crate::domain::value_object::{
    email::Email, language_code::LanguageCode, proficiency_level::ProficiencyLevel,
    response_speed::ResponseSpeed,
};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    level,
    native_language,
    target_language,
    learning_goals,
    allow_learning_data_sharing,
    is_deleted,
    last_login_at,
    created_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                level,
                native_language,
                target_language,
                learning_goals,
                allow_learning_data_sharing,
                is_deleted,
                last_login_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.level.id())
        .bind(user.native_language.as_str())
        .bind(user.target_language.as_str())
        .bind(user.learning_goals.as_deref())
        .bind(user.allow_learning_data_sharing)
        .bind(user.is_deleted)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AccountError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1 AND is_deleted = FALSE"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_deleted = FALSE"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND is_deleted = FALSE)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                level = $2,
                native_language = $3,
                target_language = $4,
                learning_goals = $5,
                allow_learning_data_sharing = $6,
                last_login_at = $7
            WHERE user_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.level.id())
        .bind(user.native_language.as_str())
        .bind(user.target_language.as_str())
        .bind(user.learning_goals.as_deref())
        .bind(user.allow_learning_data_sharing)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, user_id: &UserId) -> AccountResult<bool> {
        let affected = sqlx::query(
            "UPDATE users SET is_deleted = TRUE WHERE user_id = $1 AND is_deleted = FALSE",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

impl UserDirectory for PgAccountRepository {
    async fn is_live(&self, user_id: &UserId) -> AccountResult<bool> {
        let live = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1 AND is_deleted = FALSE)",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(live)
    }
}

// ============================================================================
// User Settings Repository Implementation
// ============================================================================

impl UserSettingsRepository for PgAccountRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<UserSettings>> {
        let row = sqlx::query_as::<_, UserSettingsRow>(
            r#"
            SELECT
                settings_id,
                user_id,
                tts_voice,
                stt_language,
                llm_style,
                response_speed,
                created_at,
                updated_at
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_settings()).transpose()
    }

    async fn upsert(&self, settings: &UserSettings) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (
                settings_id,
                user_id,
                tts_voice,
                stt_language,
                llm_style,
                response_speed,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                tts_voice = EXCLUDED.tts_voice,
                stt_language = EXCLUDED.stt_language,
                llm_style = EXCLUDED.llm_style,
                response_speed = EXCLUDED.response_speed,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(settings.settings_id.as_uuid())
        .bind(settings.user_id.as_uuid())
        .bind(settings.tts_voice.as_deref())
        .bind(settings.stt_language.as_deref())
        .bind(settings.llm_style.as_deref())
        .bind(settings.response_speed.map(|s| s.value() as i16))
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: &UserId) -> AccountResult<u64> {
        let deleted = sqlx::query("DELETE FROM user_settings WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    level: i16,
    native_language: String,
    target_language: String,
    learning_goals: Option<String>,
    allow_learning_data_sharing: bool,
    is_deleted: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let level = ProficiencyLevel::from_id(self.level)
            .ok_or_else(|| AccountError::Internal(format!("Invalid level: {}", self.level)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_stored(self.password_hash),
            level,
            native_language: LanguageCode::from_db(self.native_language),
            target_language: LanguageCode::from_db(self.target_language),
            learning_goals: self.learning_goals,
            allow_learning_data_sharing: self.allow_learning_data_sharing,
            is_deleted: self.is_deleted,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserSettingsRow {
    settings_id: Uuid,
    user_id: Uuid,
    tts_voice: Option<String>,
    stt_language: Option<String>,
    llm_style: Option<String>,
    response_speed: Option<i16>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserSettingsRow {
    fn into_settings(self) -> AccountResult<UserSettings> {
        let response_speed = self
            .response_speed
            .map(|s| ResponseSpeed::new(s.into()))
            .transpose()
            .map_err(|e| AccountError::Internal(format!("Invalid response_speed: {}", e)))?;

        Ok(UserSettings {
            settings_id: UserSettingsId::from_uuid(self.settings_id),
            user_id: UserId::from_uuid(self.user_id),
            tts_voice: self.tts_voice,
            stt_language: self.stt_language,
            llm_style: self.llm_style,
            response_speed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
