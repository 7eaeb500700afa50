use std::io;
use thiserror::Error;

/// Custom error type for procintel
#[derive(Error, Debug)]
pub enum ProcIntelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No process with PID {0}")]
    ProcessNotFound(u32),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for procintel
pub type Result<T> = std::result::Result<T, ProcIntelError>;

impl ProcIntelError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ProcIntelError::Config(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(msg: S) -> Self {
        ProcIntelError::InvalidArguments(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        ProcIntelError::MetricCollection(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ProcIntelError::Other(msg.into())
    }

    /// True for errors caused by the caller's input rather than the host
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ProcIntelError::InvalidArguments(_))
    }
}
