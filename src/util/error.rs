//! Error types for the property layer.

use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad TimeSamplingType parameters or a broken sample-time ordering.
    #[error("Invalid time sampling: {0}")]
    InvalidTimeSampling(String),

    /// A schema sample does not match the topology frozen by the first sample.
    #[error("Topology mismatch: {0}")]
    TopologyMismatch(String),

    /// Invalid data structure in the archive
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A sibling with the same name already exists.
    #[error("Duplicate name '{name}' under '{parent}'")]
    DuplicateName { name: String, parent: String },

    /// Type mismatch when opening or reading a property
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Sample index {index} out of bounds (count: {count})")]
    SampleOutOfBounds { index: usize, count: usize },

    /// `set_from_previous` before any sample was written.
    #[error("No previous sample to repeat on property '{0}'")]
    NoPreviousSample(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The archive was closed; handles cannot write any more.
    #[error("Archive is frozen and cannot be modified")]
    Frozen,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Failure inside a named public operation.
    #[error("{op}: {source}")]
    Context {
        op: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    pub fn time_sampling(msg: impl Into<String>) -> Self {
        Self::InvalidTimeSampling(msg.into())
    }

    /// Wrap with the name of the failing operation.
    pub fn context(self, op: &'static str) -> Self {
        Self::Context { op, source: Box::new(self) }
    }

    /// The innermost error beneath any `Context` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Attach an operation name to the error of a `Result`.
pub(crate) trait ResultExt<T> {
    fn op(self, op: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[inline]
    fn op(self, op: &'static str) -> Result<T> {
        self.map_err(|e| e.context(op))
    }
}
