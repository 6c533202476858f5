//! Live Caller Extractor
//!
//! Learning routes accept a token only while its subject account is live.
//! Deleted accounts get 401 even before their tokens expire.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use platform::bearer::{AuthenticatedUser, BearerError};

use crate::domain::repository::{CallerDirectory, LearningRepository};
use crate::presentation::handlers::LearningAppState;

/// Token subject confirmed live in the account directory
#[derive(Debug, Clone)]
pub struct LiveCaller(pub AuthenticatedUser);

impl<R, D> FromRequestParts<LearningAppState<R, D>> for LiveCaller
where
    R: LearningRepository,
    D: CallerDirectory,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &LearningAppState<R, D>,
    ) -> Result<Self, Self::Rejection> {
        let caller = AuthenticatedUser::from_headers(&parts.headers, &state.tokens)
            .map_err(IntoResponse::into_response)?;

        match state.users.is_live(&caller.user_id).await {
            Ok(true) => Ok(Self(caller)),
            Ok(false) => {
                tracing::info!(user_id = %caller.user_id, "Rejected token of deleted account");
                Err(BearerError::Revoked.into_response())
            }
            Err(err) => Err(err.into_response()),
        }
    }
}
