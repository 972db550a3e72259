//! Broker plugin entry point.

use std::sync::Arc;

use topic_tenancy_sdk::{
    BrokerEvent, EventKind, SharedSubscriptionSplitter, TenancyError, TenancyHooks, TenantResolver,
};
use tracing::info;

use crate::config::TopicTenancyConfig;
use crate::domain::{PatternTenantResolver, RegexShareSplitter, Service, TenancyLocalClient};

pub const PLUGIN_NAME: &str = "multi-tenant";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event kinds the plugin must be registered for.
pub const REGISTERED_EVENTS: [EventKind; 5] = [
    EventKind::Connect,
    EventKind::MessageIn,
    EventKind::MessageOut,
    EventKind::Subscribe,
    EventKind::Unsubscribe,
];

/// Name and version reported to the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Topic tenancy broker plugin.
///
/// Built once, before any client traffic, then shared by every broker
/// thread. It holds no mutable state: compiled patterns live inside the
/// resolver and splitter and are only read after `init`.
#[derive(Clone)]
pub struct TenancyPlugin {
    hooks: Arc<dyn TenancyHooks>,
}

impl TenancyPlugin {
    /// Compiles the configured capture pattern and the shared-subscription
    /// pattern and wires the hooks.
    ///
    /// # Errors
    ///
    /// Returns `TenancyError::InvalidPattern` if the capture pattern does not
    /// compile or does not have exactly one capture group.
    #[tracing::instrument(skip_all, fields(regex = %cfg.regex))]
    pub fn init(cfg: &TopicTenancyConfig) -> Result<Self, TenancyError> {
        let resolver = PatternTenantResolver::new(&cfg.regex)?;
        info!(plugin = PLUGIN_NAME, version = PLUGIN_VERSION, "Initializing topic tenancy");
        Self::with_resolver(Arc::new(resolver))
    }

    /// Builds the plugin from the broker's raw `key = value` options.
    ///
    /// # Errors
    ///
    /// Same as [`Self::init`].
    pub fn from_options<'o, I>(options: I) -> Result<Self, TenancyError>
    where
        I: IntoIterator<Item = (&'o str, &'o str)>,
    {
        Self::init(&TopicTenancyConfig::from_options(options))
    }

    /// Uses an alternate tenant resolver with the built-in shared
    /// subscription splitter.
    ///
    /// # Errors
    ///
    /// Returns `TenancyError::InvalidPattern` if the shared-subscription
    /// pattern fails to compile.
    pub fn with_resolver(resolver: Arc<dyn TenantResolver>) -> Result<Self, TenancyError> {
        let splitter = RegexShareSplitter::new()?;
        Ok(Self::with_capabilities(resolver, Arc::new(splitter)))
    }

    #[must_use]
    pub fn with_capabilities(
        resolver: Arc<dyn TenantResolver>,
        splitter: Arc<dyn SharedSubscriptionSplitter>,
    ) -> Self {
        let svc = Arc::new(Service::new(resolver, splitter));
        Self {
            hooks: Arc::new(TenancyLocalClient::new(svc)),
        }
    }

    #[must_use]
    pub fn info() -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME,
            version: PLUGIN_VERSION,
        }
    }

    #[must_use]
    pub fn registered_events() -> &'static [EventKind] {
        &REGISTERED_EVENTS
    }

    /// Hooks for a broker adapter that dispatches by itself.
    #[must_use]
    pub fn hooks(&self) -> Arc<dyn TenancyHooks> {
        Arc::clone(&self.hooks)
    }

    /// Dispatches one broker event to its hook.
    ///
    /// # Errors
    ///
    /// Whatever the hook returns; the broker must reject the event.
    pub fn handle(&self, event: BrokerEvent<'_, '_>) -> Result<(), TenancyError> {
        match event {
            BrokerEvent::Connect(e) => self.hooks.on_connect(e),
            BrokerEvent::MessageIn(e) => self.hooks.on_message_in(e),
            BrokerEvent::MessageOut(e) => self.hooks.on_message_out(e),
            BrokerEvent::Subscribe(e) => self.hooks.on_subscribe(e),
            BrokerEvent::Unsubscribe(e) => self.hooks.on_unsubscribe(e),
        }
    }
}
