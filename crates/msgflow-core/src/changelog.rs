//! Persisted metadata: the latest schema snapshot plus its changelog history
//!
//! This module only computes the next metadata value; reading and writing
//! `messageflow.json` belongs to `msgflow-store`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::{compare_schemas_at, Changelog};
use crate::model::Schema;

/// Latest snapshot and append-only history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub schema: Schema,
    #[serde(default)]
    pub changelogs: Vec<Changelog>,
}

/// Outcome of advancing metadata by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Metadata to persist
    pub metadata: Metadata,
    /// The changelog appended by this run, if anything changed
    pub appended: Option<Changelog>,
}

impl Metadata {
    /// Fresh metadata with an empty history
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            changelogs: Vec::new(),
        }
    }

    /// Compute the metadata that follows `previous` once `current` is known
    ///
    /// With a previous snapshot, the two schemas are compared and the
    /// changelog is appended only when it is non-empty. Without one the
    /// history starts empty.
    pub fn advance(previous: Option<Metadata>, current: Schema, at: DateTime<Utc>) -> RunRecord {
        let Some(previous) = previous else {
            return RunRecord {
                metadata: Metadata::new(current),
                appended: None,
            };
        };

        let changelog = compare_schemas_at(&previous.schema, &current, at);
        let mut changelogs = previous.changelogs;
        let appended = if changelog.is_empty() {
            None
        } else {
            changelogs.push(changelog.clone());
            Some(changelog)
        };

        RunRecord {
            metadata: Metadata {
                schema: current,
                changelogs,
            },
            appended,
        }
    }
}
