//! Error types and definitions for Ripple
//!
//! Scan failures on single entries are non-fatal and collected; missing plan
//! targets, step failures and illegal transitions are surfaced to the caller.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// A directory or file could not be read while scanning
    #[error("Scan error for {path}: {message}")]
    ScanIo { path: PathBuf, message: String },

    /// Target path is not part of the analyzed graph
    #[error("File not found in dependency graph: {path}")]
    NotFound { path: String },

    /// No change plan registered under this id
    #[error("Change plan not found: {id}")]
    PlanNotFound { id: String },

    /// A step handler failed; the plan is now marked failed
    #[error("Change plan {id} failed during {step} step: {message}")]
    PlanStep {
        id: String,
        step: String,
        message: String,
    },

    /// The external mutation service could not perform an action
    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    /// Transition not allowed from the plan's current status
    #[error("Change plan {id} cannot {operation} while {status}")]
    InvalidTransition {
        id: String,
        operation: String,
        status: String,
    },

    /// Interrupted operation
    #[error("Operation interrupted")]
    Interrupted,

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV output was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Generic analysis failure with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },
}

impl RippleError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            RippleError::PermissionDenied { .. } => ErrorSeverity::Warning,
            RippleError::ScanIo { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            RippleError::Config { .. } => ErrorSeverity::Critical,
            RippleError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            RippleError::ConfigRead { .. } => ErrorSeverity::Critical,
            RippleError::ConfigParse { .. } => ErrorSeverity::Critical,
            RippleError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            RippleError::StdoutWrite { .. } => ErrorSeverity::Critical,
            RippleError::Interrupted => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RippleError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            RippleError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            RippleError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing source directory.", path.display())
            }
            RippleError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run `ripple init` or pass options on the command line.", path.display())
            }
            RippleError::NotFound { path } => {
                format!("'{}' is not part of the analyzed source tree. Check the path and the configured extensions.", path)
            }
            RippleError::PlanNotFound { id } => {
                format!("No change plan with id '{}' exists in this session.", id)
            }
            RippleError::PlanStep { id, step, message } => {
                format!("Change plan '{}' failed at the {} step: {}. Roll the plan back or abandon it.", id, step, message)
            }
            RippleError::InvalidTransition { id, operation, status } => {
                format!("Change plan '{}' is {} and cannot {}.", id, status, operation)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        RippleError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        RippleError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        RippleError::PermissionDenied { path: path.into() }
    }

    /// Create a scan error for an unreadable entry
    pub fn scan_io_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RippleError::ScanIo {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for a graph lookup
    pub fn not_found(path: impl Into<String>) -> Self {
        RippleError::NotFound { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        RippleError::Analysis {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for RippleError {
    fn from(err: std::io::Error) -> Self {
        RippleError::io_error(err)
    }
}

impl From<toml::ser::Error> for RippleError {
    fn from(err: toml::ser::Error) -> Self {
        RippleError::TomlSerialize { source: err }
    }
}

impl From<csv::Error> for RippleError {
    fn from(err: csv::Error) -> Self {
        RippleError::Csv { source: err }
    }
}

impl From<serde_json::Error> for RippleError {
    fn from(err: serde_json::Error) -> Self {
        RippleError::JsonSerialize { source: err }
    }
}

/// Result type alias for Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;
