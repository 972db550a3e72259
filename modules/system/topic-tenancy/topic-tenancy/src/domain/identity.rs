//! Client identifier namespacing.
//!
//! Decorating the id reduces collisions between tenants that pick the same
//! client id. It does not make ids globally unique: `a@b` in tenant `c` and
//! `a` in tenant `b@c` still compose to the same string.

use topic_tenancy_sdk::TenantId;

use super::{DomainError, compose};

/// Composes `<client_id>@<tenant>`.
///
/// # Errors
///
/// Returns `DomainError::OutOfMemory` if the identifier cannot be allocated.
pub fn namespace_client_id(client_id: &str, tenant: &TenantId) -> Result<String, DomainError> {
    compose::join(&[client_id, tenant.as_str()], '@', "client id")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tenant(name: &str) -> TenantId {
        TenantId::new(name.to_owned()).unwrap()
    }

    #[test]
    fn appends_tenant_after_at_sign() {
        assert_eq!(
            namespace_client_id("client1", &tenant("foo")).unwrap(),
            "client1@foo"
        );
    }

    #[test]
    fn empty_client_id_still_gets_tenant() {
        assert_eq!(namespace_client_id("", &tenant("foo")).unwrap(), "@foo");
    }
}
