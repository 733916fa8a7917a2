use appdata_core_types::RequestId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. The load-phase kinds line up with the
/// steps of the replace protocol so a caller can tell from the kind alone
/// whether row data may have been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot
    InvalidInput,

    // Load protocol, in protocol order
    Connection,
    Preload,
    Delete,
    Insert,
    Commit,
    /// Row data is committed; identity or constraint/trigger restoration failed
    Postload,
    /// Raised while handling another failure; attached as a suppressed error
    Rollback,

    // Store access outside the load protocol (migrations, queries)
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Preload => "ERR_PRELOAD",
            ExErrorKind::Delete => "ERR_DELETE",
            ExErrorKind::Insert => "ERR_INSERT",
            ExErrorKind::Commit => "ERR_COMMIT",
            ExErrorKind::Postload => "ERR_POSTLOAD",
            ExErrorKind::Rollback => "ERR_ROLLBACK",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the failing
/// table/statement/state for diagnosis. Errors raised while recovering from this
/// one (rollback, restoration) are kept in `suppressed` rather than dropped.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    statement: Option<String>,
    state: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    suppressed: Vec<ExError>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            statement: None,
            state: None,
            request_id: None,
            message: String::new(),
            suppressed: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the logical table the failure relates to
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add the statement that failed
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statement = Some(sql.into());
        self
    }

    /// Add the load state reached when the failure happened
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach an error raised while handling this one
    pub fn push_suppressed(&mut self, err: ExError) {
        self.suppressed.push(err);
    }

    /// Get the error kind
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

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Errors raised during rollback or restoration of this failure
    pub fn suppressed(&self) -> &[ExError] {
        &self.suppressed
    }

    /// True when the failure happened after the transaction committed.
    ///
    /// The new data is durable in that case, but identity sequences or
    /// suspended constraints/triggers may not have been restored.
    pub fn data_committed(&self) -> bool {
        self.kind == ExErrorKind::Postload
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
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(state) = &self.state {
            write!(f, " (state: {})", state)?;
        }
        if !self.suppressed.is_empty() {
            write!(f, " (+{} suppressed)", self.suppressed.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors found while normalizing a snapshot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// Review result name has no numeric code
    #[error("Unknown review result '{value}' for asset {asset_id} rule {rule_id}")]
    UnknownResult {
        asset_id: i64,
        rule_id: String,
        value: String,
    },

    /// Review action name has no numeric code
    #[error("Unknown review action '{value}' for asset {asset_id} rule {rule_id}")]
    UnknownAction {
        asset_id: i64,
        rule_id: String,
        value: String,
    },

    /// Review status name has no numeric code
    #[error("Unknown review status '{value}' for asset {asset_id} rule {rule_id}")]
    UnknownStatus {
        asset_id: i64,
        rule_id: String,
        value: String,
    },

    /// Timestamp is neither RFC 3339 nor `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid timestamp '{value}' in {context}")]
    InvalidTimestamp { context: String, value: String },

    /// Snapshot document could not be decoded
    #[error("Malformed snapshot: {message}")]
    Malformed { message: String },
}

impl From<SnapshotError> for ExError {
    fn from(err: SnapshotError) -> Self {
        let op = match &err {
            SnapshotError::Malformed { .. } => "parse_snapshot",
            _ => "normalize",
        };
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(op)
            .with_message(err.to_string())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed {
            message: err.to_string(),
        }
    }
}
