//! In-memory broker double that drives the plugin the way a real MQTT broker
//! would: connect, subscribe, publish routed through registered filters,
//! deliver per subscriber.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

use topic_tenancy::{TenancyPlugin, TopicTenancyConfig};
use topic_tenancy_sdk::{
    BrokerEvent, ClientSession, ConnectEvent, MessageEvent, SubscribeEvent, TenancyError,
    UnsubscribeEvent,
};

/// Index of a connected client inside [`TestBroker`].
pub type ClientHandle = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub client_id: String,
    pub topic: String,
}

struct Subscription {
    client: ClientHandle,
    filter: String,
}

pub struct TestBroker {
    plugin: TenancyPlugin,
    sessions: Vec<ClientSession>,
    subscriptions: Vec<Subscription>,
    /// Topics as the broker routed them, after the inbound hook.
    pub routed: Vec<String>,
}

impl TestBroker {
    pub fn new(plugin: TenancyPlugin) -> Self {
        Self {
            plugin,
            sessions: Vec::new(),
            subscriptions: Vec::new(),
            routed: Vec::new(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(TenancyPlugin::init(&TopicTenancyConfig::default()).unwrap())
    }

    pub fn session(&self, client: ClientHandle) -> &ClientSession {
        &self.sessions[client]
    }

    pub fn connect(&mut self, id: &str, username: Option<&str>) -> ClientHandle {
        let mut session = ClientSession::new(id, username.map(str::to_owned));
        self.plugin
            .handle(BrokerEvent::Connect(&mut ConnectEvent::new(&mut session)))
            .unwrap();
        self.sessions.push(session);
        self.sessions.len() - 1
    }

    /// Registers `filter` after the subscribe hook rewrote it. Returns the
    /// filter as registered.
    pub fn subscribe(
        &mut self,
        client: ClientHandle,
        filter: &str,
    ) -> Result<String, TenancyError> {
        let mut event = SubscribeEvent::new(&self.sessions[client], filter);
        self.plugin.handle(BrokerEvent::Subscribe(&mut event))?;
        let filter = event.topic_filter.into_owned();
        self.subscriptions.push(Subscription {
            client,
            filter: filter.clone(),
        });
        Ok(filter)
    }

    /// Deregisters `filter` after the unsubscribe hook rewrote it. Returns
    /// whether a registration was removed.
    pub fn unsubscribe(
        &mut self,
        client: ClientHandle,
        filter: &str,
    ) -> Result<bool, TenancyError> {
        let mut event = UnsubscribeEvent::new(&self.sessions[client], filter);
        self.plugin.handle(BrokerEvent::Unsubscribe(&mut event))?;
        let before = self.subscriptions.len();
        self.subscriptions
            .retain(|s| !(s.client == client && s.filter == event.topic_filter));
        Ok(self.subscriptions.len() != before)
    }

    /// Publishes `topic` and returns what each matching subscriber receives.
    /// A shared group gets one delivery, to its first member.
    pub fn publish(
        &mut self,
        client: ClientHandle,
        topic: &str,
    ) -> Result<Vec<Delivery>, TenancyError> {
        let mut event = MessageEvent::new(&self.sessions[client], topic);
        self.plugin.handle(BrokerEvent::MessageIn(&mut event))?;
        let routed = event.topic.into_owned();

        let mut served_groups: Vec<&str> = Vec::new();
        let mut deliveries = Vec::new();
        for sub in &self.subscriptions {
            let (group, filter) = split_shared(&sub.filter);
            if !topic_matches(filter, &routed) {
                continue;
            }
            if let Some(group) = group {
                if served_groups.contains(&group) {
                    continue;
                }
                served_groups.push(group);
            }

            let receiver = &self.sessions[sub.client];
            let mut out = MessageEvent::new(receiver, &routed);
            self.plugin.handle(BrokerEvent::MessageOut(&mut out))?;
            deliveries.push(Delivery {
                client_id: receiver.id().to_owned(),
                topic: out.topic.into_owned(),
            });
        }
        self.routed.push(routed);
        Ok(deliveries)
    }
}

fn split_shared(filter: &str) -> (Option<&str>, &str) {
    let Some(rest) = filter.strip_prefix("$share/") else {
        return (None, filter);
    };
    match rest.split_once('/') {
        Some((group, inner)) => (Some(group), inner),
        None => (None, filter),
    }
}

/// MQTT filter matching with `+` and `#`.
pub fn topic_matches(filter: &str, topic: &str) -> bool {
    let mut levels = topic.split('/');
    for f in filter.split('/') {
        match f {
            "#" => return true,
            "+" => {
                if levels.next().is_none() {
                    return false;
                }
            }
            literal => {
                if levels.next() != Some(literal) {
                    return false;
                }
            }
        }
    }
    levels.next().is_none()
}
