//! Error types for the topic tenancy module.

use thiserror::Error;

/// Errors returned to the broker by tenancy hooks and constructors.
///
/// A client whose username does not match the capture pattern is not an
/// error: such clients are passed through untouched.
#[derive(Debug, Error)]
pub enum TenancyError {
    /// The capture pattern failed to compile or does not carry exactly one
    /// capture group. Fatal at initialization.
    #[error("invalid capture pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern text as configured.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// Allocation failed while composing a rewritten string.
    ///
    /// Aborts only the current event.
    #[error("out of memory while composing {target}")]
    OutOfMemory {
        /// What was being composed (e.g. `topic`, `client id`).
        target: &'static str,
    },

    /// A filter starts with `$share/` but does not split into
    /// `$share/<group>/<filter>`.
    ///
    /// The subscription request is rejected rather than admitted unscoped.
    #[error("shared subscription filter `{filter}` does not match `$share/<group>/<filter>`")]
    InvalidSharedFilter {
        /// The filter as requested by the client.
        filter: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TenancyError {
    /// Returns `true` if the error rejects a single event rather than
    /// preventing the plugin from starting.
    #[must_use]
    pub fn is_per_event(&self) -> bool {
        matches!(
            self,
            Self::OutOfMemory { .. } | Self::InvalidSharedFilter { .. }
        )
    }
}
