//! Bearer Token Issuance and Verification
//!
//! HS256-signed JWTs carrying the subject (user id) and email. Expiry is
//! checked with zero clock-skew tolerance.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

// ============================================================================
// Config
// ============================================================================

/// Signing configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC secret (at least 32 bytes recommended)
    pub secret: Vec<u8>,
    pub issuer: String,
    pub audience: String,
    /// Lifetime of an access token
    pub ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: Vec::new(),
            issuer: "echo-api".to_string(),
            audience: "echo-clients".to_string(),
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl TokenConfig {
    /// Default settings with a fresh 32-byte secret.
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        let mut secret = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self {
            secret,
            ..Default::default()
        }
    }

    /// Development settings (random secret, 24 hour tokens)
    pub fn development() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            ..Self::with_random_secret()
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish()
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: user id
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl AccessClaims {
    /// Subject parsed as a UUID
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

/// A freshly minted token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Service
// ============================================================================

/// Mints and checks access tokens. Immutable after construction.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is compared in verify_at so the check has no leeway and can use
        // an injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            encoding: EncodingKey::from_secret(&config.secret),
            decoding: DecodingKey::from_secret(&config.secret),
            validation,
            config,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn issue(&self, subject: Uuid, email: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, email, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = chrono::Duration::from_std(self.config.ttl)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let expires_at = now + ttl;

        let claims = AccessClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        // Second precision, matching the exp claim.
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(expires_at);

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature, issuer, audience and expiry at `now`.
    ///
    /// A token is rejected once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL_MINUTES: u64 = 60;

    fn service() -> TokenService {
        TokenService::new(TokenConfig {
            secret: b"0123456789abcdef0123456789abcdef".to_vec(),
            ttl: Duration::from_secs(TTL_MINUTES * 60),
            ..Default::default()
        })
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let user = Uuid::new_v4();
        let token = service.issue(user, "a@x.io").unwrap();

        let claims = service.verify(&token.access_token).unwrap();
        assert_eq!(claims.subject().unwrap(), user);
        assert_eq!(claims.email, "a@x.io");
        assert_eq!(claims.iss, "echo-api");
        assert_eq!(claims.aud, "echo-clients");
    }

    #[test]
    fn test_expires_at_is_issue_time_plus_ttl() {
        let token = service()
            .issue_at(Uuid::new_v4(), "a@x.io", issued_at())
            .unwrap();
        assert_eq!(
            token.expires_at,
            issued_at() + chrono::Duration::minutes(TTL_MINUTES as i64)
        );
    }

    #[test]
    fn test_expiry_boundary_has_no_skew() {
        let service = service();
        let token = service
            .issue_at(Uuid::new_v4(), "a@x.io", issued_at())
            .unwrap();
        let ttl = chrono::Duration::minutes(TTL_MINUTES as i64);
        let second = chrono::Duration::seconds(1);

        assert!(
            service
                .verify_at(&token.access_token, issued_at() + ttl - second)
                .is_ok()
        );
        assert!(matches!(
            service.verify_at(&token.access_token, issued_at() + ttl),
            Err(TokenError::Expired)
        ));
        assert!(matches!(
            service.verify_at(&token.access_token, issued_at() + ttl + second),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(Uuid::new_v4(), "a@x.io").unwrap();
        let other = TokenService::new(TokenConfig::with_random_secret());
        assert!(matches!(
            other.verify(&token.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = service().issue(Uuid::new_v4(), "a@x.io").unwrap();
        let other = TokenService::new(TokenConfig {
            audience: "someone-else".to_string(),
            ..service().config().clone()
        });
        assert!(matches!(
            other.verify(&token.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().verify("not.a.jwt"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_unique_jti() {
        let service = service();
        let user = Uuid::new_v4();
        let a = service.issue(user, "a@x.io").unwrap();
        let b = service.issue(user, "a@x.io").unwrap();
        let a = service.verify(&a.access_token).unwrap();
        let b = service.verify(&b.access_token).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains("0123456789abcdef"));
    }
}
