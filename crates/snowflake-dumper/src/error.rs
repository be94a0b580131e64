//! Error types for the metadata planner.

use thiserror::Error;

/// Main error type for planning operations.
#[derive(Error, Debug)]
pub enum DumperError {
    /// Configuration error (unknown override key, empty override, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A dynamic header could not be derived from a result set
    #[error("Header derivation failed for {destination}: {message}")]
    HeaderDerivation {
        destination: String,
        message: String,
    },

    /// The task list violates its dependency rules
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumperError {
    /// Create a HeaderDerivation error
    pub fn header(destination: impl Into<String>, message: impl Into<String>) -> Self {
        DumperError::HeaderDerivation {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Process exit code an embedding tool should report for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumperError::Config(_) | DumperError::Yaml(_) => 2,
            DumperError::Io(_) => 3,
            DumperError::HeaderDerivation { .. } | DumperError::InvalidPlan(_) => 4,
            DumperError::Json(_) => 1,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, DumperError>;
