//! msgflow Store - everything that touches the filesystem
//!
//! Provides:
//! - Metadata persistence (`messageflow.json`) with atomic writes
//! - The AsyncAPI extraction adapter
//! - Multi-file loading that extracts and merges in one step

pub mod asyncapi;
pub mod atomic;
pub mod errors;
pub mod loader;
pub mod metadata;

// Re-export key types
pub use asyncapi::AsyncApiSource;
pub use errors::Result;
pub use loader::{load_schema, split_paths};
pub use metadata::{MetadataStore, METADATA_FILE};
