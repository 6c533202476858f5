//! Bearer Authentication
//!
//! Reads `Authorization: Bearer <token>` and resolves the caller identity
//! from the token subject.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use thiserror::Error;

use crate::token::{TokenError, TokenService};

/// Bearer authentication failures. All of them are 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not a bearer token")]
    Malformed,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    /// Signature checks out but the subject account is gone
    #[error("Account no longer exists")]
    Revoked,
}

impl From<TokenError> for BearerError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => BearerError::Expired,
            TokenError::Invalid | TokenError::Encoding(_) => BearerError::Invalid,
        }
    }
}

impl IntoResponse for BearerError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Bearer authentication rejected");
        AppError::unauthorized(self.to_string())
            .with_action("Sign in to obtain a new access token")
            .into_response()
    }
}

/// Token part of an `Authorization: Bearer` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}

/// Verified caller identity.
///
/// Usable as a handler argument in any router whose state yields an
/// `Arc<TokenService>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl AuthenticatedUser {
    /// Verify a raw header map against `tokens`.
    pub fn from_headers(headers: &HeaderMap, tokens: &TokenService) -> Result<Self, BearerError> {
        let token = extract_bearer(headers)?;
        let claims = tokens.verify(token)?;
        let subject = claims.subject()?;

        Ok(Self {
            user_id: UserId::from_uuid(subject),
            email: claims.email,
        })
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BearerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        Self::from_headers(&parts.headers, &tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenConfig;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(extract_bearer(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_extract_bearer_rejects() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(BearerError::Missing)
        );
        assert_eq!(
            extract_bearer(&headers("Basic dXNlcjpwdw==")),
            Err(BearerError::Malformed)
        );
        assert_eq!(
            extract_bearer(&headers("Bearer ")),
            Err(BearerError::Malformed)
        );
        assert_eq!(
            extract_bearer(&headers("token")),
            Err(BearerError::Malformed)
        );
    }

    #[test]
    fn test_authenticated_user_from_headers() {
        let tokens = TokenService::new(TokenConfig::with_random_secret());
        let user = Uuid::new_v4();
        let issued = tokens.issue(user, "a@x.io").unwrap();

        let caller = AuthenticatedUser::from_headers(
            &headers(&format!("Bearer {}", issued.access_token)),
            &tokens,
        )
        .unwrap();
        assert_eq!(caller.user_id.into_uuid(), user);
        assert_eq!(caller.email, "a@x.io");
    }

    #[test]
    fn test_rejection_is_401() {
        for err in [BearerError::Invalid, BearerError::Revoked] {
            let response = err.into_response();
            assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
        }
    }
}
