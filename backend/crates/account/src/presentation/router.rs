//! Account Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::{UserDataCascade, UserRepository, UserSettingsRepository};
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router with the PostgreSQL repository
pub fn account_router<C>(repo: PgAccountRepository, cascade: C, config: AccountConfig) -> Router
where
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    account_router_generic(repo, cascade, config)
}

/// Create an account router for any repository implementation
pub fn account_router_generic<R, C>(repo: R, cascade: C, config: AccountConfig) -> Router
where
    R: UserRepository + UserSettingsRepository + Clone + Send + Sync + 'static,
    C: UserDataCascade + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        cascade: Arc::new(cascade),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, C>))
        .route("/login", post(handlers::login::<R, C>))
        .route(
            "/me",
            get(handlers::get_me::<R, C>)
                .put(handlers::edit_me::<R, C>)
                .delete(handlers::delete_me::<R, C>),
        )
        .route(
            "/me/settings",
            get(handlers::get_settings::<R, C>).put(handlers::update_settings::<R, C>),
        )
        .with_state(state)
}
