//! Collaborator seams: extraction in, diagram description and image out.

use std::fmt;

use crate::errors::Result;
use crate::model::Schema;
use crate::view::FormatOptions;

/// Tag naming a diagram-description dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType(String);

impl TargetType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A diagram description tagged with the dialect it is written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSchema {
    pub target_type: TargetType,
    pub data: Vec<u8>,
}

/// What a target can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCapabilities {
    pub format: bool,
    pub render: bool,
}

/// Produces a schema from one input document
pub trait SchemaExtractor {
    /// # Errors
    ///
    /// Fails when the document cannot be read or turned into a schema.
    fn extract_schema(&self) -> Result<Schema>;
}

/// Turns a schema view into a diagram description
pub trait SchemaFormatter {
    /// # Errors
    ///
    /// Fails with `UnsupportedFormatMode` for modes the target does not draw.
    fn format_schema(&self, schema: &Schema, options: &FormatOptions) -> Result<FormattedSchema>;
}

/// Turns a diagram description into image bytes
pub trait SchemaRenderer {
    /// # Errors
    ///
    /// Fails with `UnsupportedFormat` when the description is tagged for
    /// another target, or `Render` when the backend fails.
    fn render_schema(&self, formatted: &FormattedSchema) -> Result<Vec<u8>>;
}

/// A formatter and renderer pair that can be shared across worker threads
pub trait Target: SchemaFormatter + SchemaRenderer + Send + Sync {
    fn capabilities(&self) -> TargetCapabilities;
}
