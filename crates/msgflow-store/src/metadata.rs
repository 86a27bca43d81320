//! `messageflow.json`: the persisted snapshot and changelog history.

use std::fs;
use std::path::{Path, PathBuf};

use msgflow_core::Metadata;

use crate::atomic::atomic_write;
use crate::errors::{io_error, persistence_error, serialization_error, Result};

/// File name of the persisted metadata inside the output directory
pub const METADATA_FILE: &str = "messageflow.json";

/// Reads and writes the metadata file of one output directory
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(METADATA_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous run's metadata
    ///
    /// A missing file means there is no previous run.
    ///
    /// # Errors
    ///
    /// `Persistence` when the file exists but cannot be read or is not valid
    /// metadata JSON; the `Io` or `Serialization` cause is its source.
    pub fn load(&self) -> Result<Option<Metadata>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let entity = self.path.display().to_string();
        let text = fs::read_to_string(&self.path).map_err(|e| {
            persistence_error("load_metadata", &entity, io_error("read_metadata", e))
        })?;
        let metadata = serde_json::from_str(&text).map_err(|e| {
            persistence_error(
                "load_metadata",
                &entity,
                serialization_error("parse_metadata", e),
            )
        })?;

        Ok(Some(metadata))
    }

    /// Persist metadata as pretty JSON, replacing the previous file atomically
    ///
    /// # Errors
    ///
    /// `Persistence` wrapping the `Serialization` or `Io` cause.
    pub fn save(&self, metadata: &Metadata) -> Result<()> {
        let entity = self.path.display().to_string();
        let json = serde_json::to_string_pretty(metadata).map_err(|e| {
            persistence_error(
                "save_metadata",
                &entity,
                serialization_error("encode_metadata", e),
            )
        })?;
        atomic_write(&self.path, json.as_bytes())
            .map_err(|e| persistence_error("save_metadata", &entity, e))?;

        tracing::debug!(
            path = %self.path.display(),
            changelogs_len = metadata.changelogs.len(),
            "saved metadata"
        );
        Ok(())
    }
}
