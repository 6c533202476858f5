//! HTTP Handlers
//!
//! Every route requires a bearer token for a live account; the caller is
//! always the token subject.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{MistakeCategoryId, MistakeId, StudySessionId, VocabularyId};
use platform::token::TokenService;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::LearningConfig;
use crate::application::{
    AddVocabularyInput, AddVocabularyUseCase, CreateCategoryUseCase, DeleteCategoryUseCase,
    DeleteMistakeUseCase, DeleteSessionUseCase, DeleteVocabularyUseCase, EditVocabularyInput,
    EditVocabularyUseCase, EndSessionUseCase, ListCategoriesUseCase, ListMistakesUseCase,
    ListSessionsUseCase, ListVocabularyUseCase, PracticeHistoryUseCase, RecordMistakeInput,
    RecordMistakeUseCase, RecordPracticeInput, RecordPracticeUseCase, SetImprovementUseCase,
    StartSessionInput, StartSessionUseCase,
};
use crate::domain::repository::{CallerDirectory, LearningRepository};
use crate::error::LearningResult;
use crate::presentation::caller::LiveCaller;
use crate::presentation::dto::{
    AddVocabularyRequest, CategoryResponse, CreateCategoryRequest, EditVocabularyRequest,
    MistakeResponse, PracticeResponse, RecordMistakeRequest, RecordPracticeRequest,
    SessionResponse, SetImprovementRequest, StartSessionRequest, VocabularyResponse,
};

/// Shared state for learning handlers
#[derive(Clone)]
pub struct LearningAppState<R, D>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    pub repo: Arc<R>,
    pub users: Arc<D>,
    pub config: Arc<LearningConfig>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Vocabulary
// ============================================================================

/// POST /api/vocabulary/add
pub async fn add_vocabulary<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Json(req): Json<AddVocabularyRequest>,
) -> LearningResult<impl IntoResponse>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let input = AddVocabularyInput {
        expression: req.expression,
        translation: req.translation,
        example_sentence: req.example_sentence,
        source: req.source,
        knowledge_level: req.knowledge_level,
    };

    let vocabulary = AddVocabularyUseCase::new(state.repo.clone())
        .execute(&caller.user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(VocabularyResponse::from(&vocabulary))))
}

/// GET /api/vocabulary/vocabularies
pub async fn list_vocabulary<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
) -> LearningResult<Json<Vec<VocabularyResponse>>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let entries = ListVocabularyUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(entries.iter().map(VocabularyResponse::from).collect()))
}

/// PUT /api/vocabulary/{id}
pub async fn edit_vocabulary<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
    Json(req): Json<EditVocabularyRequest>,
) -> LearningResult<Json<VocabularyResponse>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let input = EditVocabularyInput {
        expression: req.expression,
        translation: req.translation,
        example_sentence: req.example_sentence,
        knowledge_level: req.knowledge_level,
    };

    let vocabulary = EditVocabularyUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&caller.user_id, &VocabularyId::from_uuid(id), input)
        .await?;

    Ok(Json(VocabularyResponse::from(&vocabulary)))
}

/// DELETE /api/vocabulary/{id}
pub async fn delete_vocabulary<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<StatusCode>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    DeleteVocabularyUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&caller.user_id, &VocabularyId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Practice
// ============================================================================

/// POST /api/vocabulary/{id}/practice
pub async fn record_practice<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordPracticeRequest>,
) -> LearningResult<impl IntoResponse>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let input = RecordPracticeInput {
        success: req.success,
        response_time_ms: req.response_time_ms,
    };

    let record =
        RecordPracticeUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
            .execute(&caller.user_id, &VocabularyId::from_uuid(id), input)
            .await?;

    Ok((StatusCode::CREATED, Json(PracticeResponse::from(&record))))
}

/// GET /api/vocabulary/{id}/practice
pub async fn practice_history<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<Json<Vec<PracticeResponse>>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let records =
        PracticeHistoryUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
            .execute(&caller.user_id, &VocabularyId::from_uuid(id))
            .await?;

    Ok(Json(records.iter().map(PracticeResponse::from).collect()))
}

// ============================================================================
// Study Sessions
// ============================================================================

/// POST /api/sessions
pub async fn start_session<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Json(req): Json<StartSessionRequest>,
) -> LearningResult<impl IntoResponse>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let input = StartSessionInput {
        session_type: req.session_type,
        title: req.title,
    };

    let session = StartSessionUseCase::new(state.repo.clone())
        .execute(&caller.user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}

/// GET /api/sessions
pub async fn list_sessions<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
) -> LearningResult<Json<Vec<SessionResponse>>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let sessions = ListSessionsUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(sessions.iter().map(SessionResponse::from).collect()))
}

/// POST /api/sessions/{id}/end
pub async fn end_session<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<Json<SessionResponse>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let session = EndSessionUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &StudySessionId::from_uuid(id))
        .await?;

    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<StatusCode>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    DeleteSessionUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &StudySessionId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Mistakes
// ============================================================================

/// POST /api/mistakes
pub async fn record_mistake<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Json(req): Json<RecordMistakeRequest>,
) -> LearningResult<impl IntoResponse>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let input = RecordMistakeInput {
        category_id: MistakeCategoryId::from_uuid(req.category_id),
        original_text: req.original_text,
        corrected_text: req.corrected_text,
        explanation: req.explanation,
    };

    let mistake = RecordMistakeUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&caller.user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(MistakeResponse::from(&mistake))))
}

/// GET /api/mistakes
pub async fn list_mistakes<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
) -> LearningResult<Json<Vec<MistakeResponse>>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let mistakes = ListMistakesUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(mistakes.iter().map(MistakeResponse::from).collect()))
}

/// PUT /api/mistakes/{id}/improvement
pub async fn set_improvement<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
    Json(req): Json<SetImprovementRequest>,
) -> LearningResult<Json<MistakeResponse>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let mistake = SetImprovementUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &MistakeId::from_uuid(id), req.improvement)
        .await?;

    Ok(Json(MistakeResponse::from(&mistake)))
}

/// DELETE /api/mistakes/{id}
pub async fn delete_mistake<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<StatusCode>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    DeleteMistakeUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &MistakeId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Mistake Categories
// ============================================================================

/// POST /api/mistake-categories
pub async fn create_category<R, D>(
    State(state): State<LearningAppState<R, D>>,
    LiveCaller(caller): LiveCaller,
    Json(req): Json<CreateCategoryRequest>,
) -> LearningResult<impl IntoResponse>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let category = CreateCategoryUseCase::new(state.repo.clone())
        .execute(&req.name)
        .await?;

    tracing::debug!(
        user_id = %caller.user_id,
        category_id = %category.category_id,
        "Category created by user"
    );

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(&category))))
}

/// GET /api/mistake-categories
pub async fn list_categories<R, D>(
    State(state): State<LearningAppState<R, D>>,
    _caller: LiveCaller,
) -> LearningResult<Json<Vec<CategoryResponse>>>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(categories.iter().map(CategoryResponse::from).collect()))
}

/// DELETE /api/mistake-categories/{id}
pub async fn delete_category<R, D>(
    State(state): State<LearningAppState<R, D>>,
    _caller: LiveCaller,
    Path(id): Path<Uuid>,
) -> LearningResult<StatusCode>
where
    R: LearningRepository,
    D: CallerDirectory,
{
    DeleteCategoryUseCase::new(state.repo.clone())
        .execute(&MistakeCategoryId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
