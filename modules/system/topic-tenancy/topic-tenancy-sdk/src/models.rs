//! Event records exchanged between the broker and the tenancy hooks.
//!
//! Topics and filters are held as `Cow<'a, str>`: the broker lends its own
//! buffer as `Cow::Borrowed`, and a hook that rewrites the value replaces it
//! wholesale with `Cow::Owned`. A hook never mutates or frees the borrowed
//! buffer; when nothing is rewritten the event comes back still borrowed.

use std::borrow::Cow;
use std::fmt;

/// Tenant identifier derived from a username.
///
/// Always non-empty. Derived fresh on every event and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Wraps an already allocated tenant string.
    ///
    /// Returns `None` for an empty string.
    #[must_use]
    pub fn new(value: String) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broker-owned view of a connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession {
    id: String,
    username: Option<String>,
}

impl ClientSession {
    #[must_use]
    pub fn new(id: impl Into<String>, username: Option<String>) -> Self {
        Self {
            id: id.into(),
            username,
        }
    }

    /// Effective client identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Authenticated username; `None` for anonymous clients.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Installs a new effective identifier and hands the previous one back
    /// to the caller.
    pub fn replace_id(&mut self, id: String) -> String {
        std::mem::replace(&mut self.id, id)
    }
}

/// Connection established; the only event allowed to touch the client id.
#[derive(Debug)]
pub struct ConnectEvent<'a> {
    pub client: &'a mut ClientSession,
}

impl<'a> ConnectEvent<'a> {
    #[must_use]
    pub fn new(client: &'a mut ClientSession) -> Self {
        Self { client }
    }
}

/// A message on its way into the broker (publish) or out to a subscriber
/// (delivery).
///
/// `client` is the publisher on the inbound path and the receiving
/// subscriber on the outbound path.
#[derive(Debug)]
pub struct MessageEvent<'a> {
    pub client: &'a ClientSession,
    pub topic: Cow<'a, str>,
    pub qos: u8,
    pub retain: bool,
}

impl<'a> MessageEvent<'a> {
    /// Builds a QoS 0, non-retained message event over a borrowed topic.
    #[must_use]
    pub fn new(client: &'a ClientSession, topic: &'a str) -> Self {
        Self {
            client,
            topic: Cow::Borrowed(topic),
            qos: 0,
            retain: false,
        }
    }

    #[must_use]
    pub fn with_qos(mut self, qos: u8) -> Self {
        self.qos = qos;
        self
    }

    #[must_use]
    pub fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }
}

/// A subscription request about to be registered by the broker.
#[derive(Debug)]
pub struct SubscribeEvent<'a> {
    pub client: &'a ClientSession,
    pub topic_filter: Cow<'a, str>,
    pub qos: u8,
}

impl<'a> SubscribeEvent<'a> {
    #[must_use]
    pub fn new(client: &'a ClientSession, topic_filter: &'a str) -> Self {
        Self {
            client,
            topic_filter: Cow::Borrowed(topic_filter),
            qos: 0,
        }
    }

    #[must_use]
    pub fn with_qos(mut self, qos: u8) -> Self {
        self.qos = qos;
        self
    }
}

/// An unsubscribe request about to be deregistered by the broker.
#[derive(Debug)]
pub struct UnsubscribeEvent<'a> {
    pub client: &'a ClientSession,
    pub topic_filter: Cow<'a, str>,
}

impl<'a> UnsubscribeEvent<'a> {
    #[must_use]
    pub fn new(client: &'a ClientSession, topic_filter: &'a str) -> Self {
        Self {
            client,
            topic_filter: Cow::Borrowed(topic_filter),
        }
    }
}

/// Broker event types the tenancy layer registers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connect,
    MessageIn,
    MessageOut,
    Subscribe,
    Unsubscribe,
}

impl EventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::MessageIn => "message_in",
            Self::MessageOut => "message_out",
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event record handed over by the broker's dispatch mechanism.
#[derive(Debug)]
pub enum BrokerEvent<'e, 'a> {
    Connect(&'e mut ConnectEvent<'a>),
    MessageIn(&'e mut MessageEvent<'a>),
    MessageOut(&'e mut MessageEvent<'a>),
    Subscribe(&'e mut SubscribeEvent<'a>),
    Unsubscribe(&'e mut UnsubscribeEvent<'a>),
}

impl BrokerEvent<'_, '_> {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Connect(_) => EventKind::Connect,
            Self::MessageIn(_) => EventKind::MessageIn,
            Self::MessageOut(_) => EventKind::MessageOut,
            Self::Subscribe(_) => EventKind::Subscribe,
            Self::Unsubscribe(_) => EventKind::Unsubscribe,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn tenant_id_rejects_empty() {
        assert!(TenantId::new(String::new()).is_none());
        let tenant = TenantId::new("foo".to_owned());
        assert_eq!(tenant.map(|t| t.as_str().to_owned()), Some("foo".to_owned()));
    }

    #[test]
    fn replace_id_returns_previous_identifier() {
        let mut session = ClientSession::new("client1", Some("user@foo".to_owned()));
        let previous = session.replace_id("client1@foo".to_owned());
        assert_eq!(previous, "client1");
        assert_eq!(session.id(), "client1@foo");
        assert_eq!(session.username(), Some("user@foo"));
    }

    #[test]
    fn new_events_borrow_the_broker_buffer() {
        let session = ClientSession::new("c", None);
        let topic = String::from("sensors/temp");
        let event = MessageEvent::new(&session, &topic).with_qos(1).with_retain(true);
        assert!(matches!(event.topic, Cow::Borrowed("sensors/temp")));
        assert_eq!(event.qos, 1);
        assert!(event.retain);

        let sub = SubscribeEvent::new(&session, "sensors/+").with_qos(2);
        assert!(matches!(sub.topic_filter, Cow::Borrowed("sensors/+")));
        assert_eq!(sub.qos, 2);
    }

    #[test]
    fn broker_event_reports_its_kind() {
        let mut session = ClientSession::new("c", None);
        let mut connect = ConnectEvent::new(&mut session);
        assert_eq!(BrokerEvent::Connect(&mut connect).kind(), EventKind::Connect);

        let session = ClientSession::new("c", None);
        let mut message = MessageEvent::new(&session, "t");
        assert_eq!(
            BrokerEvent::MessageOut(&mut message).kind().to_string(),
            "message_out"
        );
        let mut unsub = UnsubscribeEvent::new(&session, "t/#");
        assert_eq!(
            BrokerEvent::Unsubscribe(&mut unsub).kind(),
            EventKind::Unsubscribe
        );
    }
}
