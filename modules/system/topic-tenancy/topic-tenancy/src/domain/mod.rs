//! Domain layer for topic tenancy.

pub mod compose;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod local_client;
pub mod service;
pub mod shared;
pub mod subscriptions;
pub mod topics;

pub use error::DomainError;
pub use extractor::PatternTenantResolver;
pub use local_client::TenancyLocalClient;
pub use service::Service;
pub use shared::RegexShareSplitter;
