//! Change and changelog types.
//!
//! JSON field names are part of the persisted `messageflow.json` layout and
//! must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a detected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Changed,
}

/// Entity class a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Service,
    Channel,
    Message,
}

/// One semantic difference between two schema snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub change_type: ChangeType,

    pub category: ChangeCategory,

    /// `service`, `service:operation-key` or `service:operation-key:reply`
    pub name: String,

    /// Human readable sentence
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,

    /// Structural diff lines prefixed with `+ `, `- ` or `~ `
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diff: String,

    pub timestamp: DateTime<Utc>,
}

/// The batch of changes produced by one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Changelog {
    /// An empty changelog means "no semantic difference"
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Changed => "changed",
        }
    }
}

impl ChangeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Service => "service",
            ChangeCategory::Channel => "channel",
            ChangeCategory::Message => "message",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
