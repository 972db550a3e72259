//! Topic Tenancy SDK
//!
//! This crate provides the public API for the `topic-tenancy` module:
//!
//! - [`TenancyHooks`] - Broker-facing hook trait (connect, publish, delivery,
//!   subscribe, unsubscribe)
//! - [`TenantResolver`] - Capability deriving a tenant from a username
//! - [`SharedSubscriptionSplitter`] - Capability splitting `$share/<group>/<filter>`
//! - [`ClientSession`], [`MessageEvent`], [`SubscribeEvent`], ... - Event records
//! - [`TenancyError`] - Error types
//!
//! ## Usage
//!
//! A broker adapter holds the hooks behind an `Arc` and calls them from its
//! I/O threads:
//!
//! ```ignore
//! use topic_tenancy_sdk::{ClientSession, MessageEvent, TenancyHooks};
//!
//! let session = ClientSession::new("sensor-1", Some("alice@foo".to_owned()));
//! let mut event = MessageEvent::new(&session, "temp");
//! hooks.on_message_in(&mut event)?;
//! assert_eq!(event.topic, "foo/temp");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::TenancyHooks;
pub use error::TenancyError;
pub use models::{
    BrokerEvent, ClientSession, ConnectEvent, EventKind, MessageEvent, SubscribeEvent, TenantId,
    UnsubscribeEvent,
};
pub use plugin_api::{SHARE_MARKER, SharedFilter, SharedSubscriptionSplitter, TenantResolver};
