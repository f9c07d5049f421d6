// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
///
/// Every variant is a pre-launch failure. Once a process is running, its
/// failures are only reported through the log port and the diagnostic sink.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Source metadata could not be obtained
    #[error("Failed to probe {path}: {message}")]
    Probe { path: String, message: String },

    /// The encoder process could not be started
    #[error("Failed to launch {argv:?}: {source}")]
    Launch {
        argv: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// An argument vector without a program name
    #[error("Cannot launch an empty command")]
    EmptyCommand,

    /// Ad-hoc command string ended inside a quoted section
    #[error("Unclosed quote in command line: {command}")]
    UnclosedQuote { command: String },

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Build a probe error for a source path
    pub fn probe(path: &str, message: impl Into<String>) -> Self {
        DomainError::Probe {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
