//! Topic Tenancy Module
//!
//! Lets many teams share one MQTT broker while each believes it owns the
//! whole topic namespace. A tenant is derived from every client's username
//! with a capture pattern; the broker-facing hooks then
//!
//! - decorate the client id as `<id>@<tenant>` on connect,
//! - prefix published topics with `<tenant>/`,
//! - strip that prefix again on delivery,
//! - scope subscribe/unsubscribe filters, keeping `$share/<group>/` outermost.
//!
//! Clients without a tenant (anonymous, or a username the pattern does not
//! match) pass through untouched and see the global namespace.
//!
//! The entry point for a broker adapter is [`TenancyPlugin`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod plugin;
pub mod telemetry;


pub use config::TopicTenancyConfig;
pub use domain::{PatternTenantResolver, RegexShareSplitter, TenancyLocalClient};
pub use plugin::{PluginInfo, TenancyPlugin};
