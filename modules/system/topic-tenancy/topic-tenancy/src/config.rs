//! Configuration for the topic tenancy module.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Capture pattern used when none is configured: `user@team` yields `team`.
pub const DEFAULT_CAPTURE_PATTERN: &str = "^[a-z0-9]+@([a-z0-9]+)$";

/// Broker plugin option carrying the capture pattern. Matched
/// case-insensitively.
pub const CAPTURE_PATTERN_OPTION: &str = "regex";

/// Prefix of environment variables overriding file configuration,
/// e.g. `TOPIC_TENANCY_REGEX`.
pub const ENV_PREFIX: &str = "TOPIC_TENANCY_";

/// Module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopicTenancyConfig {
    /// Pattern applied to the username. Must contain exactly one capture
    /// group; the captured text is the tenant.
    pub regex: String,
}

impl Default for TopicTenancyConfig {
    fn default() -> Self {
        Self {
            regex: DEFAULT_CAPTURE_PATTERN.to_owned(),
        }
    }
}

impl TopicTenancyConfig {
    /// Loads the configuration in layers: defaults, then the YAML file (if
    /// given), then `TOPIC_TENANCY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Config` if the file does not exist or a layer
    /// does not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self, DomainError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(DomainError::Config(format!(
                    "config file does not exist: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        Self::from_figment(&figment)
    }

    /// Extracts the configuration from an already assembled figment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Config` if extraction fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, DomainError> {
        figment
            .extract()
            .map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Builds the configuration from the broker's raw plugin options.
    ///
    /// Only the `regex` key is recognized (case-insensitively); when it is
    /// repeated the last value wins. Other keys are ignored.
    pub fn from_options<'o, I>(options: I) -> Self
    where
        I: IntoIterator<Item = (&'o str, &'o str)>,
    {
        let mut cfg = Self::default();
        for (key, value) in options {
            if key.eq_ignore_ascii_case(CAPTURE_PATTERN_OPTION) {
                value.clone_into(&mut cfg.regex);
            } else {
                tracing::debug!(option = key, "Ignoring unknown plugin option");
            }
        }
        cfg
    }
}
