//! Error taxonomy for the recommendation engine.
//!
//! Scoring itself never fails. The only request-time error is asking
//! for a user that does not exist; the rest come from configuration
//! and the async runtime.

use catalog::{CatalogError, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The requested user id is not in the profile store
    #[error("User {user_id} not found")]
    UserNotFound { user_id: UserId },

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed
    #[error("Failed to load configuration from {path}: {reason}")]
    Config { path: String, reason: String },

    /// A candidate source panicked on the blocking pool
    #[error("{source_name} task failed: {reason}")]
    TaskFailed { source_name: String, reason: String },

    /// Catalog data could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl RecommendError {
    /// True when the caller asked for an unknown user (a 404, not a failure)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecommendError::UserNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
