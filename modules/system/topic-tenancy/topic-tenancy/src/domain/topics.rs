//! Publish and delivery topic rewriting.

use topic_tenancy_sdk::TenantId;

use super::{DomainError, compose};

/// Inbound rewrite: `<tenant>/<topic>`.
///
/// # Errors
///
/// Returns `DomainError::OutOfMemory` if the topic cannot be allocated.
pub fn scope_topic(topic: &str, tenant: &TenantId) -> Result<String, DomainError> {
    compose::join(&[tenant.as_str(), topic], '/', "topic")
}

/// Outbound rewrite: the part of `topic` after `<tenant>/`.
///
/// Returns `None` when the topic does not carry the tenant segment: it must
/// start with the tenant immediately followed by `/`, and something must
/// remain after the separator. `barrier/status` is not in tenant `bar`.
#[must_use]
pub fn unscope_topic<'t>(topic: &'t str, tenant: &TenantId) -> Option<&'t str> {
    let rest = topic.strip_prefix(tenant.as_str())?.strip_prefix('/')?;
    if rest.is_empty() { None } else { Some(rest) }
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
    fn scope_prefixes_tenant_segment() {
        assert_eq!(scope_topic("temp", &tenant("foo")).unwrap(), "foo/temp");
        assert_eq!(
            scope_topic("a/b/c", &tenant("foo")).unwrap(),
            "foo/a/b/c"
        );
        assert_eq!(scope_topic("/lead", &tenant("foo")).unwrap(), "foo//lead");
    }

    #[test]
    fn unscope_strips_exactly_one_segment() {
        assert_eq!(unscope_topic("foo/temp", &tenant("foo")), Some("temp"));
        assert_eq!(unscope_topic("foo/foo/x", &tenant("foo")), Some("foo/x"));
        assert_eq!(unscope_topic("foo//lead", &tenant("foo")), Some("/lead"));
    }

    #[test]
    fn unscope_requires_segment_boundary() {
        let bar = tenant("bar");
        assert_eq!(unscope_topic("barrier/status", &bar), None);
        assert_eq!(unscope_topic("ba/status", &bar), None);
        assert_eq!(unscope_topic("other/bar/x", &bar), None);
    }

    #[test]
    fn unscope_requires_something_after_separator() {
        let foo = tenant("foo");
        assert_eq!(unscope_topic("foo/", &foo), None);
        assert_eq!(unscope_topic("foo", &foo), None);
        assert_eq!(unscope_topic("fo", &foo), None);
        assert_eq!(unscope_topic("", &foo), None);
    }

    #[test]
    fn round_trip_restores_original_topic() {
        for (topic, name) in [
            ("temp", "foo"),
            ("sensors/kitchen/temp", "bar"),
            ("bar/already/prefixed", "bar"),
            ("/", "x"),
            ("$SYS/uptime", "ops7"),
            ("t\u{e9}l\u{e9}m\u{e9}trie/\u{1f321}", "t"),
        ] {
            let t = tenant(name);
            let scoped = scope_topic(topic, &t).unwrap();
            assert_eq!(unscope_topic(&scoped, &t), Some(topic));
        }
    }
}
