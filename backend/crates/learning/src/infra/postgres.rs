//! PostgreSQL Repository Implementations

use account::{AccountResult, UserDataCascade};
use chrono::{DateTime, Utc};
use kernel::error::conversions::{is_foreign_key_violation, is_unique_violation};
use kernel::id::{
    MistakeCategoryId, MistakeId, PracticeRecordId, StudySessionId, UserId, VocabularyId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    mistake::Mistake, mistake_category::MistakeCategory, practice_record::PracticeRecord,
    study_session::StudySession, vocabulary::Vocabulary,
};
use crate::domain::repository::{
    MistakeCategoryRepository, MistakeRepository, PracticeRepository, StudySessionRepository,
    VocabularyRepository,
};
use crate::domain::value_object::{
    improvement_status::ImprovementStatus, knowledge_level::KnowledgeLevel,
    session_type::SessionType, vocabulary_source::VocabularySource,
};
use crate::error::{LearningError, LearningResult};

/// PostgreSQL-backed learning repository
#[derive(Clone)]
pub struct PgLearningRepository {
    pool: PgPool,
}

impl PgLearningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VOCABULARY_COLUMNS: &str = r#"
    vocabulary_id,
    user_id,
    expression,
    translation,
    example_sentence,
    source,
    knowledge_level,
    is_deleted,
    created_at
"#;

const SESSION_COLUMNS: &str = r#"
    session_id,
    user_id,
    session_type,
    title,
    started_at,
    ended_at,
    is_deleted
"#;

const MISTAKE_COLUMNS: &str = r#"
    mistake_id,
    user_id,
    category_id,
    original_text,
    corrected_text,
    explanation,
    improvement,
    is_deleted,
    created_at
"#;

// ============================================================================
// Vocabulary Repository Implementation
// ============================================================================

impl VocabularyRepository for PgLearningRepository {
    async fn create(&self, vocabulary: &Vocabulary) -> LearningResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vocabularies (
                vocabulary_id,
                user_id,
                expression,
                translation,
                example_sentence,
                source,
                knowledge_level,
                is_deleted,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(vocabulary.vocabulary_id.as_uuid())
        .bind(vocabulary.user_id.as_uuid())
        .bind(&vocabulary.expression)
        .bind(&vocabulary.translation)
        .bind(vocabulary.example_sentence.as_deref())
        .bind(vocabulary.source.id())
        .bind(vocabulary.knowledge_level.id())
        .bind(vocabulary.is_deleted)
        .bind(vocabulary.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, vocabulary_id: &VocabularyId) -> LearningResult<Option<Vocabulary>> {
        let row = sqlx::query_as::<_, VocabularyRow>(&format!(
            "SELECT {VOCABULARY_COLUMNS} FROM vocabularies \
             WHERE vocabulary_id = $1 AND is_deleted = FALSE"
        ))
        .bind(vocabulary_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_vocabulary()).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<Vocabulary>> {
        let rows = sqlx::query_as::<_, VocabularyRow>(&format!(
            "SELECT {VOCABULARY_COLUMNS} FROM vocabularies \
             WHERE user_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_vocabulary()).collect()
    }

    async fn update(&self, vocabulary: &Vocabulary) -> LearningResult<()> {
        sqlx::query(
            r#"
            UPDATE vocabularies SET
                expression = $2,
                translation = $3,
                example_sentence = $4,
                knowledge_level = $5
            WHERE vocabulary_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(vocabulary.vocabulary_id.as_uuid())
        .bind(&vocabulary.expression)
        .bind(&vocabulary.translation)
        .bind(vocabulary.example_sentence.as_deref())
        .bind(vocabulary.knowledge_level.id())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, vocabulary_id: &VocabularyId) -> LearningResult<bool> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            "UPDATE vocabularies SET is_deleted = TRUE \
             WHERE vocabulary_id = $1 AND is_deleted = FALSE",
        )
        .bind(vocabulary_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE vocabulary_practice_history SET is_deleted = TRUE \
             WHERE vocabulary_id = $1 AND is_deleted = FALSE",
        )
        .bind(vocabulary_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }
}

// ============================================================================
// Practice Repository Implementation
// ============================================================================

impl PracticeRepository for PgLearningRepository {
    async fn create(&self, record: &PracticeRecord) -> LearningResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vocabulary_practice_history (
                practice_id,
                vocabulary_id,
                practiced_at,
                response_time_ms,
                success,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.practice_id.as_uuid())
        .bind(record.vocabulary_id.as_uuid())
        .bind(record.practiced_at)
        .bind(record.response_time_ms)
        .bind(record.success)
        .bind(record.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_vocabulary(
        &self,
        vocabulary_id: &VocabularyId,
    ) -> LearningResult<Vec<PracticeRecord>> {
        let rows = sqlx::query_as::<_, PracticeRow>(
            r#"
            SELECT
                practice_id,
                vocabulary_id,
                practiced_at,
                response_time_ms,
                success,
                is_deleted
            FROM vocabulary_practice_history
            WHERE vocabulary_id = $1 AND is_deleted = FALSE
            ORDER BY practiced_at DESC
            "#,
        )
        .bind(vocabulary_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PracticeRow::into_record).collect())
    }
}

// ============================================================================
// Study Session Repository Implementation
// ============================================================================

impl StudySessionRepository for PgLearningRepository {
    async fn create(&self, session: &StudySession) -> LearningResult<()> {
        sqlx::query(
            r#"
            INSERT INTO study_sessions (
                session_id,
                user_id,
                session_type,
                title,
                started_at,
                ended_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.session_type.id())
        .bind(session.title.as_deref())
        .bind(session.started_at)
        .bind(session.ended_at)
        .bind(session.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &StudySessionId) -> LearningResult<Option<StudySession>> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM study_sessions \
             WHERE session_id = $1 AND is_deleted = FALSE"
        ))
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<StudySession>> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM study_sessions \
             WHERE user_id = $1 AND is_deleted = FALSE \
             ORDER BY started_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_session()).collect()
    }

    async fn update(&self, session: &StudySession) -> LearningResult<()> {
        sqlx::query(
            r#"
            UPDATE study_sessions SET
                title = $2,
                ended_at = $3
            WHERE session_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.title.as_deref())
        .bind(session.ended_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, session_id: &StudySessionId) -> LearningResult<bool> {
        let affected = sqlx::query(
            "UPDATE study_sessions SET is_deleted = TRUE \
             WHERE session_id = $1 AND is_deleted = FALSE",
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Mistake Repository Implementation
// ============================================================================

impl MistakeRepository for PgLearningRepository {
    async fn create(&self, mistake: &Mistake) -> LearningResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO mistakes (
                mistake_id,
                user_id,
                category_id,
                original_text,
                corrected_text,
                explanation,
                improvement,
                is_deleted,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(mistake.mistake_id.as_uuid())
        .bind(mistake.user_id.as_uuid())
        .bind(mistake.category_id.as_uuid())
        .bind(&mistake.original_text)
        .bind(&mistake.corrected_text)
        .bind(mistake.explanation.as_deref())
        .bind(mistake.improvement.id())
        .bind(mistake.is_deleted)
        .bind(mistake.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Category removed between lookup and insert
            Err(e) if is_foreign_key_violation(&e) => Err(LearningError::CategoryNotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, mistake_id: &MistakeId) -> LearningResult<Option<Mistake>> {
        let row = sqlx::query_as::<_, MistakeRow>(&format!(
            "SELECT {MISTAKE_COLUMNS} FROM mistakes \
             WHERE mistake_id = $1 AND is_deleted = FALSE"
        ))
        .bind(mistake_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_mistake()).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> LearningResult<Vec<Mistake>> {
        let rows = sqlx::query_as::<_, MistakeRow>(&format!(
            "SELECT {MISTAKE_COLUMNS} FROM mistakes \
             WHERE user_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_mistake()).collect()
    }

    async fn update(&self, mistake: &Mistake) -> LearningResult<()> {
        sqlx::query(
            r#"
            UPDATE mistakes SET
                explanation = $2,
                improvement = $3
            WHERE mistake_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(mistake.mistake_id.as_uuid())
        .bind(mistake.explanation.as_deref())
        .bind(mistake.improvement.id())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, mistake_id: &MistakeId) -> LearningResult<bool> {
        let affected = sqlx::query(
            "UPDATE mistakes SET is_deleted = TRUE WHERE mistake_id = $1 AND is_deleted = FALSE",
        )
        .bind(mistake_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Mistake Category Repository Implementation
// ============================================================================

impl MistakeCategoryRepository for PgLearningRepository {
    async fn create(&self, category: &MistakeCategory) -> LearningResult<()> {
        let result = sqlx::query(
            "INSERT INTO mistake_categories (category_id, name, created_at) VALUES ($1, $2, $3)",
        )
        .bind(category.category_id.as_uuid())
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(LearningError::CategoryNameTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(
        &self,
        category_id: &MistakeCategoryId,
    ) -> LearningResult<Option<MistakeCategory>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, created_at FROM mistake_categories WHERE category_id = $1",
        )
        .bind(category_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn list(&self) -> LearningResult<Vec<MistakeCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, created_at FROM mistake_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn delete(&self, category_id: &MistakeCategoryId) -> LearningResult<bool> {
        let result = sqlx::query("DELETE FROM mistake_categories WHERE category_id = $1")
            .bind(category_id.as_uuid())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(LearningError::CategoryInUse),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Account Deletion Cascade
// ============================================================================

impl UserDataCascade for PgLearningRepository {
    async fn tombstone_user_data(&self, user_id: &UserId) -> AccountResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut flagged = 0;

        flagged += sqlx::query(
            r#"
            UPDATE vocabulary_practice_history SET is_deleted = TRUE
            WHERE is_deleted = FALSE
              AND vocabulary_id IN (SELECT vocabulary_id FROM vocabularies WHERE user_id = $1)
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        for table in ["vocabularies", "study_sessions", "mistakes"] {
            flagged += sqlx::query(&format!(
                "UPDATE {table} SET is_deleted = TRUE WHERE user_id = $1 AND is_deleted = FALSE"
            ))
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        tracing::info!(user_id = %user_id, rows = flagged, "Learning data tombstoned");

        Ok(flagged)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct VocabularyRow {
    vocabulary_id: Uuid,
    user_id: Uuid,
    expression: String,
    translation: String,
    example_sentence: Option<String>,
    source: i16,
    knowledge_level: i16,
    is_deleted: bool,
    created_at: DateTime<Utc>,
}

impl VocabularyRow {
    fn into_vocabulary(self) -> LearningResult<Vocabulary> {
        let source = VocabularySource::from_id(self.source)
            .ok_or_else(|| LearningError::Internal(format!("Invalid source: {}", self.source)))?;
        let knowledge_level = KnowledgeLevel::from_id(self.knowledge_level).ok_or_else(|| {
            LearningError::Internal(format!("Invalid knowledge_level: {}", self.knowledge_level))
        })?;

        Ok(Vocabulary {
            vocabulary_id: VocabularyId::from_uuid(self.vocabulary_id),
            user_id: UserId::from_uuid(self.user_id),
            expression: self.expression,
            translation: self.translation,
            example_sentence: self.example_sentence,
            source,
            knowledge_level,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PracticeRow {
    practice_id: Uuid,
    vocabulary_id: Uuid,
    practiced_at: DateTime<Utc>,
    response_time_ms: Option<i32>,
    success: bool,
    is_deleted: bool,
}

impl PracticeRow {
    fn into_record(self) -> PracticeRecord {
        PracticeRecord {
            practice_id: PracticeRecordId::from_uuid(self.practice_id),
            vocabulary_id: VocabularyId::from_uuid(self.vocabulary_id),
            practiced_at: self.practiced_at,
            response_time_ms: self.response_time_ms,
            success: self.success,
            is_deleted: self.is_deleted,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    session_type: i16,
    title: Option<String>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl SessionRow {
    fn into_session(self) -> LearningResult<StudySession> {
        let session_type = SessionType::from_id(self.session_type).ok_or_else(|| {
            LearningError::Internal(format!("Invalid session_type: {}", self.session_type))
        })?;

        Ok(StudySession {
            session_id: StudySessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            session_type,
            title: self.title,
            started_at: self.started_at,
            ended_at: self.ended_at,
            is_deleted: self.is_deleted,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MistakeRow {
    mistake_id: Uuid,
    user_id: Uuid,
    category_id: Uuid,
    original_text: String,
    corrected_text: String,
    explanation: Option<String>,
    improvement: i16,
    is_deleted: bool,
    created_at: DateTime<Utc>,
}

impl MistakeRow {
    fn into_mistake(self) -> LearningResult<Mistake> {
        let improvement = ImprovementStatus::from_id(self.improvement).ok_or_else(|| {
            LearningError::Internal(format!("Invalid improvement: {}", self.improvement))
        })?;

        Ok(Mistake {
            mistake_id: MistakeId::from_uuid(self.mistake_id),
            user_id: UserId::from_uuid(self.user_id),
            category_id: MistakeCategoryId::from_uuid(self.category_id),
            original_text: self.original_text,
            corrected_text: self.corrected_text,
            explanation: self.explanation,
            improvement,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> MistakeCategory {
        MistakeCategory {
            category_id: MistakeCategoryId::from_uuid(self.category_id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}
