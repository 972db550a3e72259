use std::collections::TryReserveError;

use thiserror::Error;
use topic_tenancy_sdk::TenancyError;

/// Domain-level errors for topic tenancy.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid capture pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("capture pattern `{pattern}` must have exactly one capture group, found {found}")]
    CaptureGroupCount { pattern: String, found: usize },

    #[error("allocation failed while composing {target}")]
    OutOfMemory {
        target: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("shared subscription filter `{filter}` does not match `$share/<group>/<filter>`")]
    InvalidSharedFilter { filter: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// Error reported by a pluggable tenant resolver.
    #[error(transparent)]
    Resolver(#[from] TenancyError),
}

/// Convert domain errors to SDK errors for the API boundary.
impl From<DomainError> for TenancyError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidPattern { pattern, source } => Self::InvalidPattern {
                pattern,
                reason: source.to_string(),
            },
            DomainError::CaptureGroupCount { pattern, found } => Self::InvalidPattern {
                pattern,
                reason: format!("expected exactly one capture group, found {found}"),
            },
            DomainError::OutOfMemory { target, .. } => Self::OutOfMemory { target },
            DomainError::InvalidSharedFilter { filter } => Self::InvalidSharedFilter { filter },
            DomainError::Config(msg) => Self::Config(msg),
            DomainError::Resolver(e) => e,
        }
    }
}
