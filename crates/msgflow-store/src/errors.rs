//! Error handling for msgflow-store
//!
//! Wraps msgflow-core ExError with store-specific helpers

use msgflow_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a (de)serialization error for a persisted file
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Wrap a failure to read or write persisted metadata
///
/// `cause` stays reachable through `source_error`.
pub fn persistence_error(operation: &str, entity: &str, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_entity(entity.to_string())
        .with_message(format!("{} failed", operation.replace('_', " ")))
        .with_source(cause)
}

/// Create an invalid input error
pub fn invalid_input(operation: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(reason.to_string())
}
