//! Learning Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use account::PgAccountRepository;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::config::LearningConfig;
use crate::domain::repository::{CallerDirectory, LearningRepository};
use crate::infra::postgres::PgLearningRepository;
use crate::presentation::handlers::{self, LearningAppState};

/// Create the learning router with the PostgreSQL repositories.
///
/// `tokens` must be the service the account router issues with.
pub fn learning_router(
    repo: PgLearningRepository,
    users: PgAccountRepository,
    config: LearningConfig,
    tokens: Arc<TokenService>,
) -> Router {
    learning_router_generic(repo, users, config, tokens)
}

/// Create a learning router for any repository implementation
pub fn learning_router_generic<R, D>(
    repo: R,
    users: D,
    config: LearningConfig,
    tokens: Arc<TokenService>,
) -> Router
where
    R: LearningRepository,
    D: CallerDirectory,
{
    let state = LearningAppState {
        repo: Arc::new(repo),
        users: Arc::new(users),
        config: Arc::new(config),
        tokens,
    };

    Router::new()
        // Vocabulary
        .route("/vocabulary/add", post(handlers::add_vocabulary::<R, D>))
        .route("/vocabulary/vocabularies", get(handlers::list_vocabulary::<R, D>))
        .route(
            "/vocabulary/{id}",
            put(handlers::edit_vocabulary::<R, D>).delete(handlers::delete_vocabulary::<R, D>),
        )
        .route(
            "/vocabulary/{id}/practice",
            post(handlers::record_practice::<R, D>).get(handlers::practice_history::<R, D>),
        )
        // Study sessions
        .route(
            "/sessions",
            post(handlers::start_session::<R, D>).get(handlers::list_sessions::<R, D>),
        )
        .route("/sessions/{id}/end", post(handlers::end_session::<R, D>))
        .route("/sessions/{id}", delete(handlers::delete_session::<R, D>))
        // Mistakes
        .route(
            "/mistakes",
            post(handlers::record_mistake::<R, D>).get(handlers::list_mistakes::<R, D>),
        )
        .route("/mistakes/{id}/improvement", put(handlers::set_improvement::<R, D>))
        .route("/mistakes/{id}", delete(handlers::delete_mistake::<R, D>))
        // Mistake categories
        .route(
            "/mistake-categories",
            post(handlers::create_category::<R, D>).get(handlers::list_categories::<R, D>),
        )
        .route(
            "/mistake-categories/{id}",
            delete(handlers::delete_category::<R, D>),
        )
        .with_state(state)
}
