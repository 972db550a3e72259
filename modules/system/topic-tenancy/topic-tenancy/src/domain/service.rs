//! Domain service for topic tenancy.
//!
//! Stateless per event: every call derives the tenant from the client's
//! username, rewrites the one field it owns and drops the tenant again. The
//! resolver and splitter are read-only after construction and shared by all
//! broker threads.

use std::borrow::Cow;
use std::sync::Arc;

use topic_tenancy_sdk::{
    ClientSession, EventKind, SharedSubscriptionSplitter, TenantId, TenantResolver,
};
use tracing::{trace, warn};

use super::{DomainError, identity, subscriptions, topics};
use crate::telemetry::WarnThrottle;

/// Topic tenancy service.
pub struct Service {
    resolver: Arc<dyn TenantResolver>,
    splitter: Arc<dyn SharedSubscriptionSplitter>,
    /// Throttle for deliveries to a tenant client on an unscoped topic.
    unscoped_delivery_log: WarnThrottle,
}

impl Service {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn TenantResolver>,
        splitter: Arc<dyn SharedSubscriptionSplitter>,
    ) -> Self {
        Self {
            resolver,
            splitter,
            unscoped_delivery_log: WarnThrottle::default(),
        }
    }

    /// Tenant of `client`; anonymous clients never have one.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures.
    pub fn tenant_of(&self, client: &ClientSession) -> Result<Option<TenantId>, DomainError> {
        let Some(username) = client.username() else {
            return Ok(None);
        };
        Ok(self.resolver.resolve(username)?)
    }

    /// Replaces the session id with `<id>@<tenant>`.
    ///
    /// # Errors
    ///
    /// `OutOfMemory`, or a resolver failure. The session is untouched on error.
    pub fn connect(&self, client: &mut ClientSession) -> Result<(), DomainError> {
        let Some(tenant) = self.tenant_of(client)? else {
            return Ok(());
        };
        let id = identity::namespace_client_id(client.id(), &tenant)?;
        let previous = client.replace_id(id);
        trace!(%tenant, client_id = %previous, new_client_id = %client.id(), "Namespaced client id");
        Ok(())
    }

    /// Prefixes a published topic with the publisher's tenant.
    ///
    /// # Errors
    ///
    /// `OutOfMemory`, or a resolver failure. The topic is untouched on error.
    pub fn message_in(
        &self,
        client: &ClientSession,
        topic: &mut Cow<'_, str>,
    ) -> Result<(), DomainError> {
        let Some(tenant) = self.tenant_of(client)? else {
            return Ok(());
        };
        let scoped = topics::scope_topic(topic, &tenant)?;
        trace!(%tenant, topic = %topic, scoped = %scoped, "Scoped inbound topic");
        *topic = Cow::Owned(scoped);
        Ok(())
    }

    /// Strips the receiving client's tenant from a delivered topic, if the
    /// topic carries it.
    ///
    /// # Errors
    ///
    /// `OutOfMemory`, or a resolver failure. The topic is untouched on error.
    pub fn message_out(
        &self,
        client: &ClientSession,
        topic: &mut Cow<'_, str>,
    ) -> Result<(), DomainError> {
        let Some(tenant) = self.tenant_of(client)? else {
            return Ok(());
        };
        let Some(rest) = topics::unscope_topic(topic, &tenant) else {
            if let Some(suppressed) = self.unscoped_delivery_log.permit(EventKind::MessageOut) {
                warn!(
                    %tenant,
                    client_id = %client.id(),
                    topic = %topic,
                    suppressed,
                    "Delivering topic without tenant segment to tenant client"
                );
            }
            return Ok(());
        };
        let unscoped = super::compose::copy(rest, "topic")?;
        trace!(%tenant, topic = %topic, unscoped = %unscoped, "Unscoped outbound topic");
        *topic = Cow::Owned(unscoped);
        Ok(())
    }

    /// Scopes a subscribe or unsubscribe filter. Both paths go through here
    /// so registration and deregistration always agree.
    ///
    /// # Errors
    ///
    /// `InvalidSharedFilter`, `OutOfMemory`, or a resolver failure. The filter
    /// is untouched on error.
    pub fn subscription(
        &self,
        client: &ClientSession,
        filter: &mut Cow<'_, str>,
    ) -> Result<(), DomainError> {
        let Some(tenant) = self.tenant_of(client)? else {
            return Ok(());
        };
        let scoped = subscriptions::scope_filter(filter, &tenant, self.splitter.as_ref())?;
        trace!(%tenant, filter = %filter, scoped = %scoped, "Scoped topic filter");
        *filter = Cow::Owned(scoped);
        Ok(())
    }
}
