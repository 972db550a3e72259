//! Tenant extraction from usernames.

use regex::Regex;
use topic_tenancy_sdk::{TenancyError, TenantId, TenantResolver};

use super::{DomainError, compose};

/// Built-in [`TenantResolver`]: the tenant is the text captured by the single
/// group of a configured pattern.
///
/// The pattern is searched (not implicitly anchored) within the username, so
/// patterns that must match the whole username carry their own `^...$`.
/// Compiled once at construction and only read afterwards.
#[derive(Debug, Clone)]
pub struct PatternTenantResolver {
    pattern: Regex,
}

impl PatternTenantResolver {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern` if the pattern does not compile
    /// - `CaptureGroupCount` if it does not have exactly one capture group
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let compiled = Regex::new(pattern).map_err(|source| DomainError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;

        // Group 0 is the implicit whole-match group.
        let groups = compiled.captures_len().saturating_sub(1);
        if groups != 1 {
            return Err(DomainError::CaptureGroupCount {
                pattern: pattern.to_owned(),
                found: groups,
            });
        }

        Ok(Self { pattern: compiled })
    }

    /// Source text of the compiled pattern, as configured.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extracts the tenant from `username`.
    ///
    /// A username that does not match, or whose capture group is empty or
    /// did not participate in the match, has no tenant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfMemory` if the tenant cannot be copied out.
    pub fn extract(&self, username: &str) -> Result<Option<TenantId>, DomainError> {
        let Some(group) = self.pattern.captures(username).and_then(|c| c.get(1)) else {
            return Ok(None);
        };
        if group.is_empty() {
            return Ok(None);
        }
        let tenant = compose::copy(group.as_str(), "tenant")?;
        Ok(TenantId::new(tenant))
    }
}

impl TenantResolver for PatternTenantResolver {
    fn resolve(&self, username: &str) -> Result<Option<TenantId>, TenancyError> {
        self.extract(username).map_err(Into::into)
    }
}
