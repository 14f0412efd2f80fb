//! Rule tags
//!
//! A rule tag names one validation rule (`required`, `ulid`, `int`, ...).
//! The set is open: anything that is not a built-in tag becomes
//! [`RuleTag::Custom`] and is dispatched through the caller-registered table.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier of a validation rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleTag {
    /// Value must be non-empty
    Required,
    /// Value must be a canonical ULID
    Ulid,
    /// Value must parse as a base-10 integer
    Int,
    /// Value must be an email address (struct validation only)
    Email,
    /// Any other tag
    Custom(String),
}

impl RuleTag {
    /// The tag as written in rule lists and message tables
    pub fn as_str(&self) -> &str {
        match self {
            RuleTag::Required => "required",
            RuleTag::Ulid => "ulid",
            RuleTag::Int => "int",
            RuleTag::Email => "email",
            RuleTag::Custom(tag) => tag,
        }
    }

    /// Split a comma-separated rule list such as `"required, ulid"`
    ///
    /// Entries are trimmed and empty entries are dropped.
    pub fn parse_list(rules: &str) -> Vec<RuleTag> {
        rules
            .split(',')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .map(RuleTag::from)
            .collect()
    }
}

impl From<&str> for RuleTag {
    fn from(tag: &str) -> Self {
        match tag.trim() {
            "required" => RuleTag::Required,
            "ulid" => RuleTag::Ulid,
            "int" => RuleTag::Int,
            "email" => RuleTag::Email,
            other => RuleTag::Custom(other.to_string()),
        }
    }
}

impl From<String> for RuleTag {
    fn from(tag: String) -> Self {
        RuleTag::from(tag.as_str())
    }
}

impl From<&String> for RuleTag {
    fn from(tag: &String) -> Self {
        RuleTag::from(tag.as_str())
    }
}

impl From<&RuleTag> for RuleTag {
    fn from(tag: &RuleTag) -> Self {
        tag.clone()
    }
}

impl From<RuleTag> for String {
    fn from(tag: RuleTag) -> Self {
        match tag {
            RuleTag::Custom(tag) => tag,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl FromStr for RuleTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RuleTag::from(s))
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
