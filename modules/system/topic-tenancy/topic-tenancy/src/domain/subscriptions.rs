//! Subscribe/unsubscribe filter rewriting.
//!
//! The tenant segment goes in front of the filter the client asked for. For
//! shared subscriptions the `$share/<group>` marker must stay outermost, or
//! the broker would no longer recognize the group, so the tenant is inserted
//! between the group and the underlying filter:
//!
//! | requested              | tenant | registered                 |
//! |------------------------|--------|----------------------------|
//! | `sensors/+`            | `bar`  | `bar/sensors/+`            |
//! | `$share/g1/sensors/+`  | `bar`  | `$share/g1/bar/sensors/+`  |
//! | `$share/g1`            | `bar`  | rejected                   |

use topic_tenancy_sdk::{SharedSubscriptionSplitter, TenantId};

use super::{DomainError, compose};

/// Scopes `filter` to `tenant`.
///
/// # Errors
///
/// - `InvalidSharedFilter` if the filter starts with `$share/` but the
///   splitter cannot split it; an unscoped shared subscription is never
///   handed back
/// - `OutOfMemory` if the rewritten filter cannot be allocated
pub fn scope_filter(
    filter: &str,
    tenant: &TenantId,
    splitter: &dyn SharedSubscriptionSplitter,
) -> Result<String, DomainError> {
    if !splitter.is_shared(filter) {
        return compose::join(&[tenant.as_str(), filter], '/', "topic filter");
    }

    let shared = splitter
        .split(filter)
        .ok_or_else(|| DomainError::InvalidSharedFilter {
            filter: filter.to_owned(),
        })?;
    compose::join(
        &[shared.share_prefix, tenant.as_str(), shared.filter],
        '/',
        "shared topic filter",
    )
}
