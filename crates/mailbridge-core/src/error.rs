//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in mail operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The automation bridge failed.
    #[error("Bridge error: {0}")]
    Osa(#[from] mailbridge_osa::Error),

    /// I/O error, e.g. while staging an outgoing message body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Automation access to the mail application is not granted.
    ///
    /// Carries the remediation instructions.
    #[error("{0}")]
    AccessDenied(String),

    /// A required input was empty or whitespace-only.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The generated script ran but reported an error of its own.
    #[error("{0}")]
    Script(String),

    /// The interpreter replied with a shape this layer does not understand.
    #[error("Unexpected reply from the mail application: {0}")]
    UnexpectedReply(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
