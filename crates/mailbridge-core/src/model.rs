//! Domain models.
//!
//! All of these are ephemeral: constructed fresh per query, never cached.
//! An [`EmailMessage`] has no identity beyond its field values, so mutating
//! operations re-resolve their target by subject and sender substring match
//! at call time.

use serde::Serialize;

/// A message as read back from the mail application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    /// Message subject.
    pub subject: String,
    /// Sender, possibly in `Name <address>` form.
    pub sender: String,
    /// Date sent, in the interpreter's native date stringification.
    pub date_sent: String,
    /// Body preview, truncated to the configured maximum.
    pub content: String,
    /// Whether the message has been read.
    pub is_read: bool,
    /// Label of the mailbox the message was listed from.
    pub mailbox: String,
}

/// Outcome of an automation access probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessStatus {
    /// Whether scripting the mail application is currently possible.
    pub granted: bool,
    /// Human-readable status, with remediation steps when denied.
    pub message: String,
}

/// Outcome of a mutating operation (archive, delete, mark-read).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Whether the operation took effect.
    pub success: bool,
    /// Human-readable confirmation or failure text.
    pub message: String,
}

impl OperationOutcome {
    /// A successful outcome with the given confirmation text.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome with the given reason.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Outcome of a reply lookup.
///
/// A no-match and a lookup error both yield `replied = false`; the two are
/// distinguishable only by the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyStatus {
    /// Whether a reply to the original message was found in the sent mailbox.
    pub replied: bool,
    /// When the reply was sent, if one was found.
    pub reply_sent_at: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl ReplyStatus {
    /// A negative result with the given detail text.
    #[must_use]
    pub fn not_replied(message: impl Into<String>) -> Self {
        Self {
            replied: false,
            reply_sent_at: None,
            message: message.into(),
        }
    }
}
