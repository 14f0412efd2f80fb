//! Message templates per rule tag
//!
//! The registry maps each [`RuleTag`] to a message template such as
//! `"{field}は必須です"`. It is built once at startup, then shared (usually
//! behind an `Arc`) with every validator that formats messages.

use indexmap::IndexMap;
use std::sync::Arc;

use super::rule::RuleTag;
use super::validation::MessageFormatter;

/// Token substituted with the field or parameter name
pub const FIELD_PLACEHOLDER: &str = "{field}";

const DEFAULT_TEMPLATES: [(RuleTag, &str); 4] = [
    (RuleTag::Required, "{field}は必須です"),
    (RuleTag::Ulid, "{field}は無効なULID形式です"),
    (RuleTag::Int, "{field}は無効な整数形式です"),
    (RuleTag::Email, "{field}は無効なメールアドレス形式です"),
];

/// Table of message templates keyed by rule tag
#[derive(Debug, Clone, Default)]
pub struct MessageRegistry {
    templates: IndexMap<RuleTag, String>,
    initialized: bool,
}

impl MessageRegistry {
    /// Create an empty, uninitialized registry
    ///
    /// Every lookup resolves to the "no message registered" fallback until
    /// [`initialize`](Self::initialize) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding only the built-in templates
    pub fn with_defaults() -> Self {
        Self::with_messages(std::iter::empty::<(RuleTag, String)>())
    }

    /// Create a registry with the built-in templates plus `custom` overrides
    pub fn with_messages<I, K, V>(custom: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<RuleTag>,
        V: Into<String>,
    {
        let mut registry = Self::new();
        registry.initialize(custom);
        registry
    }

    /// Reset to the built-in templates, then apply every non-empty override
    ///
    /// Previous overrides are discarded, so calling this twice never merges
    /// with history.
    pub fn initialize<I, K, V>(&mut self, custom: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<RuleTag>,
        V: Into<String>,
    {
        self.templates = DEFAULT_TEMPLATES
            .iter()
            .map(|(tag, template)| (tag.clone(), template.to_string()))
            .collect();

        let mut overrides = 0usize;
        for (tag, template) in custom {
            let template = template.into();
            if template.is_empty() {
                continue;
            }
            self.templates.insert(tag.into(), template);
            overrides += 1;
        }

        self.initialized = true;
        tracing::debug!(
            templates = self.templates.len(),
            overrides,
            "Message registry initialized"
        );
    }

    /// Whether [`initialize`](Self::initialize) has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Raw template registered for `tag`
    pub fn template(&self, tag: &RuleTag) -> Option<&str> {
        self.templates.get(tag).map(String::as_str)
    }

    /// Tags with a registered template, in registration order
    pub fn tags(&self) -> impl Iterator<Item = &RuleTag> {
        self.templates.keys()
    }

    /// Format the message for `tag` with `field` substituted
    pub fn resolve(&self, tag: &RuleTag, field: &str) -> String {
        match self.templates.get(tag) {
            Some(template) => template.replace(FIELD_PLACEHOLDER, field),
            None => format!("no message registered for rule '{}'", tag),
        }
    }

    /// Formatter that resolves struct violations through this registry
    pub fn formatter(registry: Arc<Self>) -> MessageFormatter {
        Arc::new(move |field: &str, tag: &str| registry.resolve(&RuleTag::from(tag), field))
    }
}
