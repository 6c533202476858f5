//! Study Session Use Cases
//!
//! Sessions are always scoped to their owner; a foreign session is reported
//! as missing.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{StudySessionId, UserId};

use crate::domain::entity::study_session::{StudySession, TITLE_MAX_LENGTH};
use crate::domain::repository::StudySessionRepository;
use crate::domain::value_object::{session_type::SessionType, text::optional_text};
use crate::error::{LearningError, LearningResult};

async fn load_session<S>(
    repo: &S,
    caller: &UserId,
    session_id: &StudySessionId,
) -> LearningResult<StudySession>
where
    S: StudySessionRepository,
{
    repo.find_by_id(session_id)
        .await?
        .filter(|session| session.user_id == *caller)
        .ok_or(LearningError::SessionNotFound)
}

#[derive(Debug, Default)]
pub struct StartSessionInput {
    pub session_type: Option<SessionType>,
    pub title: Option<String>,
}

/// Start session use case
pub struct StartSessionUseCase<S>
where
    S: StudySessionRepository,
{
    repo: Arc<S>,
}

impl<S> StartSessionUseCase<S>
where
    S: StudySessionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: StartSessionInput,
    ) -> LearningResult<StudySession> {
        let title = match input.title {
            Some(title) => optional_text("Title", &title, TITLE_MAX_LENGTH)?,
            None => None,
        };

        let session = StudySession::start(*user_id, input.session_type.unwrap_or_default(), title);
        self.repo.create(&session).await?;

        tracing::info!(
            user_id = %user_id,
            session_id = %session.session_id,
            "Study session started"
        );

        Ok(session)
    }
}

/// End session use case
pub struct EndSessionUseCase<S>
where
    S: StudySessionRepository,
{
    repo: Arc<S>,
}

impl<S> EndSessionUseCase<S>
where
    S: StudySessionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &UserId,
        session_id: &StudySessionId,
    ) -> LearningResult<StudySession> {
        let mut session = load_session(self.repo.as_ref(), caller, session_id).await?;
        if session.is_ended() {
            return Err(LearningError::SessionAlreadyEnded);
        }

        session.ended_at = Some(Utc::now());
        self.repo.update(&session).await?;

        tracing::info!(session_id = %session_id, "Study session ended");

        Ok(session)
    }
}

/// List sessions use case
pub struct ListSessionsUseCase<S>
where
    S: StudySessionRepository,
{
    repo: Arc<S>,
}

impl<S> ListSessionsUseCase<S>
where
    S: StudySessionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LearningResult<Vec<StudySession>> {
        self.repo.list_by_user(user_id).await
    }
}

/// Delete session use case
pub struct DeleteSessionUseCase<S>
where
    S: StudySessionRepository,
{
    repo: Arc<S>,
}

impl<S> DeleteSessionUseCase<S>
where
    S: StudySessionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &UserId, session_id: &StudySessionId) -> LearningResult<()> {
        load_session(self.repo.as_ref(), caller, session_id).await?;

        if !self.repo.soft_delete(session_id).await? {
            return Err(LearningError::SessionNotFound);
        }

        tracing::info!(session_id = %session_id, "Study session deleted");

        Ok(())
    }
}
