//! Application Configuration
//!
//! Process-wide capabilities for the account use cases, built once at
//! startup and shared read-only.

use std::sync::Arc;

use platform::password::{
    ClearTextPassword, CredentialHasher, HashedPassword, HashingCost, PasswordHashError,
};
use platform::token::{TokenConfig, TokenService};

/// Plaintext behind the decoy digest that unknown-email logins verify against
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub hasher: Arc<CredentialHasher>,
    pub tokens: Arc<TokenService>,
    decoy_hash: Arc<HashedPassword>,
}

impl AccountConfig {
    pub fn new(cost: HashingCost, token: TokenConfig) -> Result<Self, PasswordHashError> {
        Self::with_tokens(
            CredentialHasher::new(cost)?,
            Arc::new(TokenService::new(token)),
        )
    }

    /// Share an already constructed token service (e.g. with other routers)
    pub fn with_tokens(
        hasher: CredentialHasher,
        tokens: Arc<TokenService>,
    ) -> Result<Self, PasswordHashError> {
        let decoy = ClearTextPassword::new(DECOY_PASSWORD.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        let decoy_hash = hasher.hash(&decoy)?;

        Ok(Self {
            hasher: Arc::new(hasher),
            tokens,
            decoy_hash: Arc::new(decoy_hash),
        })
    }

    /// Run a full verification against the decoy digest and discard the result.
    pub(crate) fn burn_verification(&self, password: &ClearTextPassword) {
        let _ = self.hasher.verify(password, &self.decoy_hash);
    }
}
