//! # mailbridge-core
//!
//! Programmatic control of the macOS Mail application over the OSA
//! scripting bridge.
//!
//! Every operation follows the same shape: build an AppleScript from a
//! template ([`script`]), hand it to a [`mailbridge_osa::ScriptRunner`],
//! and decode the sentinel/delimited text reply ([`wire`]) into typed
//! results. There is no state between calls; messages carry no stable
//! handle, so mutating operations re-resolve their target by subject and
//! sender substring match.
//!
//! ## Quick start
//!
//! ```ignore
//! use mailbridge_core::MailClient;
//!
//! let client = MailClient::new();
//! let unread = client.get_unread_mails(Some(10)).await;
//! for message in unread {
//!     println!("{}: {}", message.sender, message.subject);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
pub mod config;
mod error;
mod model;
pub mod script;
pub mod wire;

pub use client::{ACCESS_REMEDIATION, MailClient};
pub use error::{Error, Result};
pub use model::{AccessStatus, EmailMessage, OperationOutcome, ReplyStatus};
