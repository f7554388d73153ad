//! Script execution through the `osascript` interpreter.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Error, Result};

/// The result of one interpreter round trip.
///
/// `osascript` stringifies everything it prints, so the production runner
/// always yields [`ScriptOutput::Text`]. The [`ScriptOutput::List`] variant
/// models OSA backends that hand back native arrays; parsers must accept
/// both shapes for list-valued replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutput {
    /// A single text value.
    Text(String),
    /// A native list of text values.
    List(Vec<String>),
}

impl ScriptOutput {
    /// Returns the text value, if this output is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }
}

/// Abstraction over the script interpreter for testability.
///
/// In production, use [`OsaScriptRunner`]. In tests, implement this trait
/// with a fake that records scripts and plays back canned replies.
pub trait ScriptRunner {
    /// Runs one script to completion and returns whatever it produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the interpreter cannot be spawned and
    /// [`Error::Interpreter`] when the script itself fails.
    fn run(&self, script: &str) -> impl Future<Output = Result<ScriptOutput>> + Send;
}

/// Production runner that spawns the system `osascript` interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsaScriptRunner;

impl OsaScriptRunner {
    /// Creates a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ScriptRunner for OsaScriptRunner {
    async fn run(&self, script: &str) -> Result<ScriptOutput> {
        tracing::trace!(bytes = script.len(), "dispatching script to osascript");

        let output = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(%message, "osascript reported an execution error");
            return Err(Error::Interpreter(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(ScriptOutput::Text(
            stdout.strip_suffix('\n').unwrap_or(&stdout).to_string(),
        ))
    }
}
