//! Load several AsyncAPI documents and merge them into one schema.

use std::time::Instant;

use msgflow_core::{log_op_end, log_op_error, log_op_start, merge_schemas_owned, Schema, SchemaExtractor};

use crate::asyncapi::AsyncApiSource;
use crate::errors::{invalid_input, Result};

/// Split a comma separated list of paths, trimming blanks
pub fn split_paths(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract every document in order and merge the results
///
/// The first document that fails aborts the load; nothing is merged from it.
///
/// # Errors
///
/// `InvalidInput` when no path is given, otherwise the extraction error of
/// the failing document with its path as entity.
pub fn load_schema<P>(paths: &[P]) -> Result<Schema>
where
    P: AsRef<str>,
{
    let start = Instant::now();
    log_op_start!("load_schema", files_len = paths.len());

    let result = extract_all(paths);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(schema) => log_op_end!(
            "load_schema",
            duration_ms = duration_ms,
            services_len = schema.services.len()
        ),
        Err(err) => log_op_error!("load_schema", err.clone(), duration_ms = duration_ms),
    }

    result
}

fn extract_all<P>(paths: &[P]) -> Result<Schema>
where
    P: AsRef<str>,
{
    let sources: Vec<AsyncApiSource> = paths
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .map(AsyncApiSource::new)
        .collect();

    if sources.is_empty() {
        return Err(invalid_input("load_schema", "no AsyncAPI files given"));
    }

    let mut schemas = Vec::with_capacity(sources.len());
    for source in &sources {
        let schema = source.extract_schema().map_err(|e| {
            msgflow_core::ExError::from(e)
                .with_op("load_schema")
                .with_entity(source.path().display().to_string())
        })?;
        schemas.push(schema);
    }

    Ok(merge_schemas_owned(schemas))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_paths_trims_and_skips_blanks() {
        assert_eq!(
            split_paths(" a.yaml, b.yaml ,,"),
            vec!["a.yaml".to_string(), "b.yaml".to_string()]
        );
    }

    #[test]
    fn test_empty_path_list_is_invalid_input() {
        let err = load_schema::<&str>(&[]).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }
}
