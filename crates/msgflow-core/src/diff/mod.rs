//! Schema diff engine.
//!
//! Compares a previously persisted schema snapshot with a freshly merged one
//! and produces a [`Changelog`] of semantic changes.
//!
//! ## Entry point
//!
//! ```
//! use msgflow_core::diff::compare_schemas;
//! use msgflow_core::Schema;
//!
//! let changelog = compare_schemas(&Schema::default(), &Schema::default());
//! assert!(changelog.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O and no hidden state; the only input besides the two
//!   schemas is the timestamp shared by every change of one run.
//! - **Determinism**: change order never depends on map iteration order.
//! - **Emptiness**: a schema compared against itself yields no changes.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare_schemas, compare_schemas_at};
pub use human_summary::render_changelog_markdown;
pub use model::{Change, ChangeCategory, ChangeType, Changelog};
