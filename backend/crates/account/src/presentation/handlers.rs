//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use platform::bearer::AuthenticatedUser;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    DeleteAccountUseCase, EditProfileInput, EditProfileUseCase, GetProfileUseCase,
    GetSettingsUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateSettingsInput, UpdateSettingsUseCase,
};
use crate::domain::repository::{UserDataCascade, UserRepository, UserSettingsRepository};
use crate::error::AccountResult;
use crate::presentation::dto::{
    EditUserRequest, LoginRequest, LoginResponse, RegisterRequest, SettingsResponse,
    UpdateSettingsRequest, UserResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R, C>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cascade: Arc<C>,
    pub config: Arc<AccountConfig>,
}

impl<R, C> FromRef<AccountAppState<R, C>> for Arc<TokenService>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AccountAppState<R, C>) -> Self {
        state.config.tokens.clone()
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/users/register
pub async fn register<R, C>(
    State(state): State<AccountAppState<R, C>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        level: req.level,
        native_language: req.native_language,
        target_language: req.target_language,
        learning_goals: req.learning_goals,
        allow_learning_data_sharing: req.allow_learning_data_sharing,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/users/login
pub async fn login<R, C>(
    State(state): State<AccountAppState<R, C>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        expires_at: output.expires_at,
    }))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/users/me
pub async fn get_me<R, C>(
    State(state): State<AccountAppState<R, C>>,
    caller: AuthenticatedUser,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let user = GetProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/me
pub async fn edit_me<R, C>(
    State(state): State<AccountAppState<R, C>>,
    caller: AuthenticatedUser,
    Json(req): Json<EditUserRequest>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let input = EditProfileInput {
        level: req.level,
        native_language: req.native_language,
        target_language: req.target_language,
        learning_goals: req.learning_goals,
        allow_learning_data_sharing: req.allow_learning_data_sharing,
    };

    let user = EditProfileUseCase::new(state.repo.clone())
        .execute(&caller.user_id, input)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/users/me
pub async fn delete_me<R, C>(
    State(state): State<AccountAppState<R, C>>,
    caller: AuthenticatedUser,
) -> AccountResult<StatusCode>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    DeleteAccountUseCase::new(state.repo.clone(), state.repo.clone(), state.cascade.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Settings (requires authentication)
// ============================================================================

/// GET /api/users/me/settings
pub async fn get_settings<R, C>(
    State(state): State<AccountAppState<R, C>>,
    caller: AuthenticatedUser,
) -> AccountResult<Json<SettingsResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let settings = GetSettingsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(SettingsResponse::from(&settings)))
}

/// PUT /api/users/me/settings
pub async fn update_settings<R, C>(
    State(state): State<AccountAppState<R, C>>,
    caller: AuthenticatedUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> AccountResult<Json<SettingsResponse>>
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let input = UpdateSettingsInput {
        tts_voice: req.tts_voice,
        stt_language: req.stt_language,
        llm_style: req.llm_style,
        response_speed: req.response_speed,
    };

    let settings = UpdateSettingsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&caller.user_id, input)
        .await?;

    Ok(Json(SettingsResponse::from(&settings)))
}
