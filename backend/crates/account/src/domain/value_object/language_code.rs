//! Language Code Value Object
//!
//! Two-letter ISO 639-1 code, stored lowercase.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> AppResult<Self> {
        let code = code.as_ref().trim().to_ascii_lowercase();

        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(AppError::bad_request(format!(
                "Invalid language code '{}': expected two letters",
                code
            )));
        }

        Ok(Self(code))
    }

    /// Default native language for new accounts
    pub fn default_native() -> Self {
        Self("hu".to_string())
    }

    /// Default target language for new accounts
    pub fn default_target() -> Self {
        Self("en".to_string())
    }

    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
