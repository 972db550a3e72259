//! Shared-subscription filter splitting.

use regex::Regex;
use topic_tenancy_sdk::{SharedFilter, SharedSubscriptionSplitter};

use super::DomainError;

/// `$share/<group>/<filter>`: group is one non-empty level, filter is
/// everything after it and must be non-empty. `(?s)` lets the filter span
/// any byte, newlines included.
pub const SHARED_SUBSCRIPTION_PATTERN: &str = r"(?s)^(\$share/[^/]+)/(.+)$";

/// Built-in [`SharedSubscriptionSplitter`] backed by a fixed pattern.
#[derive(Debug, Clone)]
pub struct RegexShareSplitter {
    pattern: Regex,
}

impl RegexShareSplitter {
    /// Compiles the fixed shared-subscription pattern.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` if the pattern fails to compile.
    pub fn new() -> Result<Self, DomainError> {
        let pattern = Regex::new(SHARED_SUBSCRIPTION_PATTERN).map_err(|source| {
            DomainError::InvalidPattern {
                pattern: SHARED_SUBSCRIPTION_PATTERN.to_owned(),
                source,
            }
        })?;
        Ok(Self { pattern })
    }
}

impl SharedSubscriptionSplitter for RegexShareSplitter {
    fn split<'f>(&self, filter: &'f str) -> Option<SharedFilter<'f>> {
        let caps = self.pattern.captures(filter)?;
        Some(SharedFilter {
            share_prefix: caps.get(1)?.as_str(),
            filter: caps.get(2)?.as_str(),
        })
    }
}
