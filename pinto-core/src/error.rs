//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export gateway error type
pub use pinto_api::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required setting is missing at both resource and provider level
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Remote call failed (status >= 400 or transport error)
    #[error("{0}")]
    Remote(#[from] ApiError),

    /// Malformed import identifier
    #[error("invalid import: {0}")]
    ImportFormat(String),

    /// A filter matched more than one entity where at most one was expected
    #[error("cannot uniquely identify {what}: wanted 1, got {count}")]
    AmbiguousResult { what: String, count: usize },

    /// A single-entity lookup matched nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// Update deleted the old entity but could not create the new one
    #[error("update of {deleted} is incomplete: the old entity was deleted but creating the replacement failed: {source}")]
    ReplaceIncomplete { deleted: String, source: ApiError },

    /// State handed over by the host could not be decoded or encoded
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The host asked for a resource or data source that is not registered
    #[error("unknown resource type: {0}")]
    UnknownResource(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log levels.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Configuration(_)
            | Self::ImportFormat(_)
            | Self::AmbiguousResult { .. }
            | Self::NotFound(_)
            | Self::UnknownResource(_) => true,
            Self::Remote(e) => e.is_expected(),
            _ => false,
        }
    }

    /// The underlying remote error, if this failure came from the gateway.
    pub fn remote(&self) -> Option<&ApiError> {
        match self {
            Self::Remote(e) | Self::ReplaceIncomplete { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
