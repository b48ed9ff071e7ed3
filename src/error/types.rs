//! Error types and definitions for packtree
//!
//! Model errors (`InvalidPath`, `DanglingDependency`, `AmbiguousUnit`) are
//! scoped to a single source file and end up as diagnostics in the build
//! report. Configuration and output errors abort the run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current file fails but the build continues
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

/// Main error type for packtree operations
#[derive(Debug, Error)]
pub enum PacktreeError {
    /// Empty or malformed dotted name handed to path resolution
    #[error("Invalid dotted name: '{name}'")]
    InvalidPath { name: String },

    /// Import line seen before any package declaration in the file
    #[error("Dependency '{reference}' at {file}:{line} has no declaring unit")]
    DanglingDependency {
        file: PathBuf,
        line: usize,
        reference: String,
    },

    /// Two distinct entities registered under the same (package, unit) pair
    #[error(
        "Ambiguous unit {qualified_name}: declared by both {} and {}",
        .first.display(),
        .second.display()
    )]
    AmbiguousUnit {
        qualified_name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be read
    #[error("Error reading source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Project or scan path does not exist
    #[error("Invalid path: {path}")]
    InvalidScanPath { path: PathBuf },

    /// The project has no source directory
    #[error("Not a source project: {path} does not exist")]
    NotASourceProject { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

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

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Every supplied source file failed
    #[error("No source file could be processed ({failed} failed)")]
    BuildFailed { failed: usize },
}

impl PacktreeError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PacktreeError::PermissionDenied { .. } => ErrorSeverity::Warning,
            PacktreeError::SourceRead { .. } => ErrorSeverity::Warning,

            PacktreeError::Config { .. } => ErrorSeverity::Critical,
            PacktreeError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            PacktreeError::ConfigRead { .. } => ErrorSeverity::Critical,
            PacktreeError::ConfigParse { .. } => ErrorSeverity::Critical,
            PacktreeError::InvalidScanPath { .. } => ErrorSeverity::Critical,
            PacktreeError::NotASourceProject { .. } => ErrorSeverity::Critical,
            PacktreeError::StdoutWrite { .. } => ErrorSeverity::Critical,
            PacktreeError::OutputWrite { .. } => ErrorSeverity::Critical,

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
            PacktreeError::InvalidPath { name } if name.is_empty() => {
                "Empty package name. A declaration or import is missing its dotted name."
                    .to_string()
            }
            PacktreeError::DanglingDependency { file, line, reference } => {
                format!(
                    "Import of '{}' at {}:{} appears before any package declaration. \
                     Skipping the rest of the file.",
                    reference,
                    file.display(),
                    line
                )
            }
            PacktreeError::PermissionDenied { path } => {
                format!(
                    "Cannot access '{}' due to permission denied. Check file permissions.",
                    path.display()
                )
            }
            PacktreeError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            PacktreeError::InvalidScanPath { path } => {
                format!(
                    "Invalid path: '{}'. Please provide a valid project directory.",
                    path.display()
                )
            }
            PacktreeError::NotASourceProject { path } => {
                format!(
                    "'{}' does not exist. Point --source-dir at the project's source root.",
                    path.display()
                )
            }
            PacktreeError::ConfigNotFound { path } => {
                format!(
                    "Configuration file not found at '{}'. \
                     Create a config file or use command line options.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        PacktreeError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        PacktreeError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid dotted name error
    pub fn invalid_path(name: impl Into<String>) -> Self {
        PacktreeError::InvalidPath { name: name.into() }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        PacktreeError::PermissionDenied { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PacktreeError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for PacktreeError {
    fn from(err: std::io::Error) -> Self {
        PacktreeError::io_error(err)
    }
}

impl From<toml::de::Error> for PacktreeError {
    fn from(err: toml::de::Error) -> Self {
        PacktreeError::TomlParse { source: err }
    }
}

impl From<csv::Error> for PacktreeError {
    fn from(err: csv::Error) -> Self {
        PacktreeError::Csv { source: err }
    }
}

impl From<glob::PatternError> for PacktreeError {
    fn from(err: glob::PatternError) -> Self {
        PacktreeError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for PacktreeError {
    fn from(err: serde_json::Error) -> Self {
        PacktreeError::JsonSerialize { source: err }
    }
}

/// Result type alias for packtree operations
pub type Result<T> = std::result::Result<T, PacktreeError>;
