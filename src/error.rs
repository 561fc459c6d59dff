//! Error types for cliparse
//!
//! Provides structured error handling with exit codes and error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes following Unix conventions
pub mod exit_codes {
    /// Everything succeeded
    pub const SUCCESS: i32 = 0;
    /// Generic failure
    pub const ERROR: i32 = 1;
    /// Invalid arguments or usage
    pub const USAGE_ERROR: i32 = 2;
}

/// Main error type for cliparse
#[derive(Error, Debug)]
pub enum CliparseError {
    /// Invalid parser or runner configuration (e.g. unknown standard flag)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Malformed command-line arguments
    #[error("{message}")]
    Usage { message: String, exit_code: i32 },

    /// Parsed arguments rejected by a validator
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Lookup of an unregistered script
    #[error("Script not found: {name}")]
    ScriptNotFound { name: String },

    /// Errors related to script manifest files
    #[error("Manifest error in {}: {message}", path.display())]
    Manifest {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system operation errors
    #[error("File system error: {operation} failed on {}", path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A script module failed to register itself
    #[error("Could not load {module}: {message}")]
    Load { module: String, message: String },
}

impl CliparseError {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new usage error with an explicit exit code
    pub fn usage(message: impl Into<String>, exit_code: i32) -> Self {
        Self::Usage {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new script-not-found error
    pub fn script_not_found(name: impl Into<String>) -> Self {
        Self::ScriptNotFound { name: name.into() }
    }

    /// Create a new manifest error
    pub fn manifest<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::Manifest {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// Create a new manifest error wrapping an underlying cause
    pub fn manifest_with_source<P, E>(message: impl Into<String>, path: P, source: E) -> Self
    where
        P: Into<PathBuf>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Manifest {
            message: message.into(),
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new module load error
    pub fn load(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { exit_code, .. } => *exit_code,
            _ => exit_codes::ERROR,
        }
    }

    /// Whether this error came from malformed arguments
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}

/// Format an error for display, optionally followed by its cause chain
pub fn format_error(error: &(dyn std::error::Error + 'static), include_chain: bool) -> String {
    let mut message = error.to_string();
    if include_chain {
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str("\n  caused by: ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
    }
    message
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CliparseError>;
