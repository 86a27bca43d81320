//! Single-view generation.
//!
//! Pipeline:
//! 1. Check that at least one output is requested and the target supports it
//! 2. Load and merge the AsyncAPI files, then sort the schema
//! 3. Format the requested view; write the description if asked
//! 4. Render the description; write the image if asked

#![allow(clippy::result_large_err)]

use std::path::PathBuf;
use std::time::Instant;

use msgflow_core::errors::{ExError, ExErrorKind};
use msgflow_core::{log_op_end, log_op_error, log_op_start, FormatOptions, Target};
use msgflow_store::atomic::atomic_write;
use msgflow_store::errors::{invalid_input, Result};
use msgflow_store::load_schema;

/// Inputs of one `gen-schema` run
#[derive(Debug, Clone, Default)]
pub struct SchemaRequest {
    /// AsyncAPI documents, merged in order
    pub files: Vec<String>,
    pub options: FormatOptions,
    /// Where to write the diagram description
    pub format_to: Option<PathBuf>,
    /// Where to write the rendered image
    pub render_to: Option<PathBuf>,
}

/// What a `gen-schema` run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOutcome {
    pub services_len: usize,
    pub formatted_to: Option<PathBuf>,
    pub rendered_to: Option<PathBuf>,
}

/// Produce one view of the merged schema
///
/// # Errors
///
/// - `InvalidInput` when neither output is requested or no file is given
/// - `UnsupportedFormat` when the target cannot do what is requested
/// - extraction, formatting, rendering and IO errors from the steps above
pub fn generate_schema(request: &SchemaRequest, target: &dyn Target) -> Result<SchemaOutcome> {
    let start = Instant::now();
    log_op_start!(
        "generate_schema",
        mode = request.options.mode.as_str(),
        files_len = request.files.len()
    );

    let result = run(request, target);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => log_op_end!(
            "generate_schema",
            duration_ms = duration_ms,
            services_len = outcome.services_len
        ),
        Err(err) => log_op_error!("generate_schema", err.clone(), duration_ms = duration_ms),
    }

    result
}

fn run(request: &SchemaRequest, target: &dyn Target) -> Result<SchemaOutcome> {
    if request.format_to.is_none() && request.render_to.is_none() {
        return Err(invalid_input(
            "generate_schema",
            "either a format or a render output file is required",
        ));
    }

    let capabilities = target.capabilities();
    if !capabilities.format {
        return Err(unsupported("target does not support formatting"));
    }
    if request.render_to.is_some() && !capabilities.render {
        return Err(unsupported("target does not support rendering"));
    }

    let schema = load_schema(&request.files)?.sorted();

    let formatted = target.format_schema(&schema, &request.options)?;

    if let Some(path) = &request.format_to {
        atomic_write(path, &formatted.data)?;
        tracing::debug!(path = %path.display(), "wrote diagram description");
    }

    if let Some(path) = &request.render_to {
        let image = target.render_schema(&formatted)?;
        atomic_write(path, &image)?;
        tracing::debug!(path = %path.display(), "wrote rendered diagram");
    }

    Ok(SchemaOutcome {
        services_len: schema.services.len(),
        formatted_to: request.format_to.clone(),
        rendered_to: request.render_to.clone(),
    })
}

fn unsupported(reason: &str) -> ExError {
    ExError::new(ExErrorKind::UnsupportedFormat)
        .with_op("generate_schema")
        .with_message(reason.to_string())
}
