use thiserror::Error;

/// Result type alias using DeadLinkError
pub type Result<T> = std::result::Result<T, DeadLinkError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and test assertions. Stale weak handles and unreflectable
/// fields are not errors and have no kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A map operation was handed something other than an object
    InvalidKey,
    /// A map `set` was handed a malformed edge list
    InvalidValue,
    /// Detector configuration could not be parsed
    InvalidConfig,
    /// A tracker diff was requested before any baseline was captured
    MissingBaseline,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidKey => "ERR_INVALID_KEY",
            ExErrorKind::InvalidValue => "ERR_INVALID_VALUE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::MissingBaseline => "ERR_MISSING_BASELINE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing operation
/// could attach.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the runtime type of the object involved
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for DeadLink operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadLinkError {
    /// A snapshot map key was not an object
    #[error("Snapshot key must be an object, got {found}")]
    InvalidKey { found: String },

    /// An edge list handed to a snapshot is malformed
    #[error("Invalid edge list for {type_name}: {reason}")]
    InvalidEdgeList { type_name: String, reason: String },

    /// Detector configuration is unreadable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A tracker was asked to diff before it captured a baseline
    #[error("No baseline snapshot captured before {op}")]
    MissingBaseline { op: String },
}

/// Conversion from DeadLinkError to ExError
impl From<DeadLinkError> for ExError {
    fn from(err: DeadLinkError) -> Self {
        let message = err.to_string();
        match err {
            DeadLinkError::InvalidKey { .. } => {
                ExError::new(ExErrorKind::InvalidKey).with_message(message)
            }
            DeadLinkError::InvalidEdgeList { type_name, .. } => {
                ExError::new(ExErrorKind::InvalidValue)
                    .with_type_name(type_name)
                    .with_message(message)
            }
            DeadLinkError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            DeadLinkError::MissingBaseline { op } => ExError::new(ExErrorKind::MissingBaseline)
                .with_op(op)
                .with_message(message),
        }
    }
}
