//! Capabilities the rewriters are built on.
//!
//! Tenant derivation and the shared-subscription split are traits so that an
//! alternate strategy (for example, tenants taken from token claims instead
//! of the username) can be plugged in without touching the rewriters.

use crate::error::TenancyError;
use crate::models::TenantId;

/// Leading marker of the MQTT shared-subscription filter grammar.
pub const SHARE_MARKER: &str = "$share/";

/// Derives a tenant from an authenticated username.
///
/// Implementations are shared read-only across broker threads.
pub trait TenantResolver: Send + Sync {
    /// Returns the tenant for `username`, or `None` if the username does not
    /// belong to any tenant. A `None` client sees the whole namespace.
    ///
    /// # Errors
    ///
    /// - `OutOfMemory` if the tenant string cannot be allocated
    fn resolve(&self, username: &str) -> Result<Option<TenantId>, TenancyError>;
}

/// A shared-subscription filter split into its two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedFilter<'f> {
    /// `$share/<group>`, without the trailing `/`.
    pub share_prefix: &'f str,
    /// The underlying filter after `$share/<group>/`.
    pub filter: &'f str,
}

/// Recognizes and splits `$share/<group>/<filter>`.
pub trait SharedSubscriptionSplitter: Send + Sync {
    /// Whether the filter uses the shared-subscription form at all.
    fn is_shared(&self, filter: &str) -> bool {
        filter.starts_with(SHARE_MARKER)
    }

    /// Splits a shared filter. Returns `None` if the filter does not follow
    /// the `$share/<group>/<filter>` grammar.
    fn split<'f>(&self, filter: &'f str) -> Option<SharedFilter<'f>>;
}
