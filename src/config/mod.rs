//! Configuration loading for message templates

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::registry::MessageRegistry;
use crate::core::rule::RuleTag;

/// Message template overrides, keyed by rule tag
///
/// ```yaml
/// messages:
///   required: "{field} is required"
///   ulid: "{field} must be a ULID"
/// ```
///
/// Keys parse as [`RuleTag`]s, so built-in and custom tags share one table.
/// Empty templates keep the built-in default for that tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default)]
    pub messages: IndexMap<RuleTag, String>,
}

impl MessagesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge multiple configurations
    ///
    /// Later configurations override earlier ones for the same tag. Empty
    /// templates do not override.
    pub fn merge(configs: Vec<MessagesConfig>) -> Self {
        let mut merged = Self::default();
        for config in configs {
            for (tag, template) in config.messages {
                if template.is_empty() {
                    merged.messages.entry(tag).or_default();
                } else {
                    merged.messages.insert(tag, template);
                }
            }
        }
        merged
    }

    /// Build an initialized registry with these overrides applied
    pub fn build_registry(&self) -> MessageRegistry {
        MessageRegistry::with_messages(&self.messages)
    }
}
