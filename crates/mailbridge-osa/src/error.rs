//! Error types for the OSA bridge.

use thiserror::Error;

/// Errors that can occur while running a script through the bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// The interpreter process could not be spawned or awaited.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The interpreter ran but reported an execution error.
    ///
    /// Carries the interpreter's own message text, e.g.
    /// `Mail got an error: Not authorized to send Apple events to Mail. (-1743)`.
    #[error("Interpreter error: {0}")]
    Interpreter(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
