//! # mailbridge-osa
//!
//! Thin wrapper around the macOS Open Scripting Architecture, as exposed by
//! the `osascript` command-line interpreter.
//!
//! This crate provides:
//! - [`ScriptRunner`]: the seam between script-building code and the live
//!   interpreter, so higher layers can be tested against a fake runner
//! - [`OsaScriptRunner`]: the production runner that spawns `osascript`
//! - [`escape_literal`]: quoting of free text for interpolation into
//!   double-quoted AppleScript string literals
//!
//! One call to [`ScriptRunner::run`] is one blocking round trip through the
//! interpreter. This layer issues no concurrent invocations and enforces no
//! timeout of its own; the scripting bridge applies its own Apple event
//! timeout.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod escape;
mod runner;

pub use error::{Error, Result};
pub use escape::escape_literal;
pub use runner::{OsaScriptRunner, ScriptOutput, ScriptRunner};
