//! msgflow Core - canonical message-flow model and its pure operations
//!
//! This crate provides the foundational data structures and operations for msgflow,
//! including:
//! - The normalized model of services, operations, channels and messages
//! - Merging of independently extracted schemas keyed by operation identity
//! - Stable ordering for deterministic output
//! - Semantic diffing of two schema snapshots into a changelog
//! - Persisted metadata (snapshot + changelog history) and its Markdown summary
//! - View selection types and the extractor/formatter/renderer seams
//!
//! Every operation here is a pure function over in-memory values; file and
//! process I/O live in `msgflow-store` and `msgflow-projection`.

pub mod changelog;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod target;
pub mod view;

// Re-export commonly used types
pub use changelog::{Metadata, RunRecord};
pub use diff::{
    compare_schemas, compare_schemas_at, render_changelog_markdown, Change, ChangeCategory,
    ChangeType, Changelog,
};
pub use errors::{ExError, ExErrorKind, MsgFlowError, Result};
pub use merge::{merge_schemas, merge_schemas_owned};
pub use model::{Action, Channel, Message, Operation, OperationKey, Schema, Service};
pub use target::{
    FormattedSchema, SchemaExtractor, SchemaFormatter, SchemaRenderer, Target,
    TargetCapabilities, TargetType,
};
pub use view::{FormatMode, FormatOptions, ViewSpec};

// Used by the logging macros so callers need no direct dependency
#[doc(hidden)]
pub mod __private {
    pub use msgflow_core_types::schema;
    pub use tracing;
}
