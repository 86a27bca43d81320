use thiserror::Error;

/// Result type alias using MsgFlowError
pub type Result<T> = std::result::Result<T, MsgFlowError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in msgflow. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and CLI diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    UnsupportedFormatMode,
    UnsupportedFormat,

    // Extraction (upstream collaborator)
    Extraction,
    UnresolvedReference,

    // Rendering (downstream collaborator)
    Render,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Orchestration
    /// A unit of work observed the cancellation signal before starting
    Cancelled,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnsupportedFormatMode => "ERR_UNSUPPORTED_FORMAT_MODE",
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::Extraction => "ERR_EXTRACTION",
            ExErrorKind::UnresolvedReference => "ERR_UNRESOLVED_REFERENCE",
            ExErrorKind::Render => "ERR_RENDER",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context a
/// user needs to find the failing stage: the operation and the entity
/// (AsyncAPI file, service, channel or output path) it was working on.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (file path, service, channel)
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for msgflow operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MsgFlowError {
    /// A view was requested in a mode no formatter implements
    #[error("{given} format mode is not supported, [{}] expected", .expected.join(" "))]
    UnsupportedFormatMode { given: String, expected: Vec<String> },

    /// A formatted description was handed to a renderer for another target
    #[error("{given} format is not supported, {expected} expected")]
    UnsupportedFormat { given: String, expected: String },

    /// A request is missing something it cannot work without
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An AsyncAPI document could not be turned into a schema
    #[error("Extracting schema from {path} failed: {reason}")]
    Extraction { path: String, reason: String },

    /// A `$ref` inside an AsyncAPI document points nowhere
    #[error("Unresolved reference {reference} in {path}")]
    UnresolvedReference { path: String, reference: String },

    /// The diagram renderer failed
    #[error("Rendering failed: {message}")]
    Render { message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from MsgFlowError to ExError
///
/// Lets library errors cross into the store/engine layers, which speak ExError.
impl From<MsgFlowError> for ExError {
    fn from(err: MsgFlowError) -> Self {
        let message = err.to_string();
        match err {
            MsgFlowError::UnsupportedFormatMode { given, .. } => {
                ExError::new(ExErrorKind::UnsupportedFormatMode)
                    .with_op("format_schema")
                    .with_entity(given)
                    .with_message(message)
            }
            MsgFlowError::UnsupportedFormat { given, .. } => {
                ExError::new(ExErrorKind::UnsupportedFormat)
                    .with_op("render_schema")
                    .with_entity(given)
                    .with_message(message)
            }
            MsgFlowError::InvalidInput { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            MsgFlowError::Extraction { path, .. } => ExError::new(ExErrorKind::Extraction)
                .with_op("extract_schema")
                .with_entity(path)
                .with_message(message),
            MsgFlowError::UnresolvedReference { path, .. } => {
                ExError::new(ExErrorKind::UnresolvedReference)
                    .with_op("extract_schema")
                    .with_entity(path)
                    .with_message(message)
            }
            MsgFlowError::Render { .. } => ExError::new(ExErrorKind::Render)
                .with_op("render_schema")
                .with_message(message),
            MsgFlowError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to MsgFlowError
impl From<serde_json::Error> for MsgFlowError {
    fn from(err: serde_json::Error) -> Self {
        MsgFlowError::Serialization {
            message: err.to_string(),
        }
    }
}
