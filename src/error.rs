//! Error taxonomy for the simulation core
//!
//! Only misconfiguration and invalid geometry are errors. Losing lives,
//! clearing the field and the ball leaving the arena are plain state changes.

/// Errors surfaced by field generation, config loading and the resolver
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Field generation or tuning values that cannot produce a playable game
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Non-finite or negative geometry handed to the resolver
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// Config JSON that does not parse
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}
