//! Error types for camp
//!
//! All modules use `CampResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for camp operations
pub type CampResult<T> = Result<T, CampError>;

/// All errors that can occur in camp
#[derive(Error, Debug)]
pub enum CampError {
    // Workspace errors
    #[error("Not a Python package: {path}: {reason}")]
    NotAPackage { path: PathBuf, reason: String },

    #[error("No virtualenv in {0}")]
    EnvironmentMissing(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    #[error("Empty command line")]
    EmptyCommand,

    // Orchestration errors
    #[error("{stage} failed for {subject}")]
    StepFailed { stage: String, subject: String },

    #[error("{failed} of {total} steps failed")]
    StepsFailed { failed: usize, total: usize },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML edit error: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),

    // General errors
    #[error("{0}")]
    User(String),
}

impl CampError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandFailed { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Some("Install virtualenv and pip, or point tools.* at them: camp config set tools.pip <path>")
            }
            Self::EnvironmentMissing(_) => Some("Run: camp up"),
            Self::StepFailed { .. } | Self::StepsFailed { .. } => {
                Some("Re-run with -v to see the output of successful commands too")
            }
            _ => None,
        }
    }
}
