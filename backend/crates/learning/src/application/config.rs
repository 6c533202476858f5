//! Application Configuration

/// Learning application configuration
#[derive(Debug, Clone)]
pub struct LearningConfig {
    /// Reject vocabulary operations on entries owned by another user.
    ///
    /// When disabled the mismatch is only logged.
    pub enforce_ownership: bool,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
        }
    }
}
