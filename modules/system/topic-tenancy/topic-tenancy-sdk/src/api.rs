//! Public hook trait called by the broker.
//!
//! The broker invokes each hook synchronously on the thread handling the
//! client's I/O. Hooks never block and never keep state between calls, so
//! one implementation is shared by every connection:
//!
//! ```ignore
//! let hooks: Arc<dyn TenancyHooks> = plugin.hooks();
//!
//! let mut event = SubscribeEvent::new(&session, "$share/g1/sensors/+");
//! hooks.on_subscribe(&mut event)?;
//! assert_eq!(event.topic_filter, "$share/g1/foo/sensors/+");
//! ```

use crate::error::TenancyError;
use crate::models::{ConnectEvent, MessageEvent, SubscribeEvent, UnsubscribeEvent};

/// Tenant isolation hooks interposed on the broker's event path.
///
/// Every hook is a no-op for anonymous clients and for clients whose
/// username yields no tenant.
pub trait TenancyHooks: Send + Sync {
    /// Decorates the client identifier as `<id>@<tenant>`.
    ///
    /// # Errors
    ///
    /// - `OutOfMemory` if the new identifier cannot be allocated
    fn on_connect(&self, event: &mut ConnectEvent<'_>) -> Result<(), TenancyError>;

    /// Prefixes a published topic with `<tenant>/` before the broker routes
    /// or stores it.
    ///
    /// # Errors
    ///
    /// - `OutOfMemory` if the rewritten topic cannot be allocated; the publish
    ///   must be rejected
    fn on_message_in(&self, event: &mut MessageEvent<'_>) -> Result<(), TenancyError>;

    /// Strips `<tenant>/` from a topic about to be delivered to the client.
    ///
    /// Topics that do not start with the tenant segment followed by `/` are
    /// delivered unchanged.
    ///
    /// # Errors
    ///
    /// - `OutOfMemory` if the stripped topic cannot be allocated
    fn on_message_out(&self, event: &mut MessageEvent<'_>) -> Result<(), TenancyError>;

    /// Scopes a subscription filter to the client's tenant.
    ///
    /// Plain filters become `<tenant>/<filter>`; shared filters become
    /// `$share/<group>/<tenant>/<filter>`.
    ///
    /// # Errors
    ///
    /// - `InvalidSharedFilter` if the filter starts with `$share/` but does
    ///   not split into group and filter
    /// - `OutOfMemory` if the rewritten filter cannot be allocated
    fn on_subscribe(&self, event: &mut SubscribeEvent<'_>) -> Result<(), TenancyError>;

    /// Scopes an unsubscribe filter exactly like [`Self::on_subscribe`], so
    /// that registration and deregistration stay in sync.
    ///
    /// # Errors
    ///
    /// Same as [`Self::on_subscribe`].
    fn on_unsubscribe(&self, event: &mut UnsubscribeEvent<'_>) -> Result<(), TenancyError>;
}
