//! Orchestration commands
//!
//! - [`schema::generate_schema`]: one view, formatted and/or rendered to files
//! - [`docs::generate_docs`]: every view, README and changelog for a schema

pub mod docs;
pub mod schema;

pub use docs::{generate_docs, DocsOptions, DocsReport};
pub use schema::{generate_schema, SchemaOutcome, SchemaRequest};
