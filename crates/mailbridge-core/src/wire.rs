//! The text protocol spoken between the generated scripts and this layer.
//!
//! Scripts tag their replies with a sentinel prefix (`SUCCESS:`/`ERROR:`)
//! and encode bulk message listings as delimited records: fields joined
//! with [`FIELD_DELIMITER`], records joined with [`RECORD_DELIMITER`].
//! Both delimiters are deliberately implausible in natural email text.
//! Treat these constants as a versioned wire format: existing callers
//! parse them verbatim.

use chrono::Local;

use mailbridge_osa::ScriptOutput;

use crate::config::{PREVIEW_ELLIPSIS, PREVIEW_MAX_CHARS};
use crate::model::EmailMessage;

/// Separates fields within one message record.
pub const FIELD_DELIMITER: &str = "<<FIELD>>";

/// Separates message records within one reply.
pub const RECORD_DELIMITER: &str = "<<RECORD>>";

/// Prefix tagging a successful reply that carries a payload.
pub const SUCCESS_PREFIX: &str = "SUCCESS:";

/// Bare success reply with no payload.
pub const SUCCESS_BARE: &str = "SUCCESS";

/// Prefix tagging a script-reported error.
pub const ERROR_PREFIX: &str = "ERROR:";

/// Reply-lookup marker for "no reply was found".
pub const NO_REPLY_MARKER: &str = "NO_REPLY";

/// Placeholder for a record with no subject field.
pub const NO_SUBJECT: &str = "No subject";

/// Placeholder for a record with no sender field.
pub const UNKNOWN_SENDER: &str = "Unknown sender";

/// Placeholder for a record with no content field.
pub const NO_CONTENT: &str = "[Content not available]";

/// A script reply, decoded from its sentinel prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The script succeeded; the payload may be empty.
    Success(String),
    /// The script reported an error with the given message.
    Error(String),
    /// Anything else, e.g. a bespoke marker like [`NO_REPLY_MARKER`].
    Other(String),
}

/// Decodes a sentinel-prefixed reply.
#[must_use]
pub fn parse_reply(text: &str) -> Reply {
    let trimmed = text.trim();
    if let Some(payload) = trimmed.strip_prefix(SUCCESS_PREFIX) {
        Reply::Success(payload.to_string())
    } else if trimmed == SUCCESS_BARE {
        Reply::Success(String::new())
    } else if let Some(message) = trimmed.strip_prefix(ERROR_PREFIX) {
        Reply::Error(message.trim().to_string())
    } else {
        Reply::Other(trimmed.to_string())
    }
}

/// Decodes a delimited-record payload into messages.
///
/// Records are split on [`RECORD_DELIMITER`] (empty fragments dropped),
/// then each record on [`FIELD_DELIMITER`]. A record is accepted only if it
/// yields at least four fields: subject, sender, date, content, plus an
/// optional read flag. Blank fields fall back to fixed placeholders; the
/// content field is truncated to the configured preview length. Every
/// message is labelled with the given mailbox name.
#[must_use]
pub fn parse_message_records(payload: &str, mailbox: &str) -> Vec<EmailMessage> {
    payload
        .split(RECORD_DELIMITER)
        .filter(|record| !record.trim().is_empty())
        .filter_map(|record| parse_record(record, mailbox))
        .collect()
}

fn parse_record(record: &str, mailbox: &str) -> Option<EmailMessage> {
    let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
    if fields.len() < 4 {
        return None;
    }

    let content = fields[3];
    Some(EmailMessage {
        subject: field_or(fields[0], NO_SUBJECT),
        sender: field_or(fields[1], UNKNOWN_SENDER),
        date_sent: date_or_now(fields[2]),
        content: if content.trim().is_empty() {
            NO_CONTENT.to_string()
        } else {
            truncate_preview(content)
        },
        is_read: fields.get(4).is_some_and(|flag| flag.trim() == "true"),
        mailbox: mailbox.to_string(),
    })
}

fn field_or(field: &str, placeholder: &str) -> String {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

fn date_or_now(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Truncates a body preview to [`PREVIEW_MAX_CHARS`] characters, appending
/// [`PREVIEW_ELLIPSIS`] when anything was cut. Strings at or under the
/// limit pass through unchanged.
#[must_use]
pub fn truncate_preview(content: &str) -> String {
    let mut chars = content.char_indices();
    match chars.nth(PREVIEW_MAX_CHARS) {
        None => content.to_string(),
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &content[..cut]),
    }
}

/// Decodes a mailbox or account name listing.
///
/// The interpreter may hand the names back as a native list or as one
/// comma-joined text value; both shapes are accepted. Names are trimmed
/// and empty entries dropped.
#[must_use]
pub fn parse_name_list(output: &ScriptOutput) -> Vec<String> {
    match output {
        ScriptOutput::List(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect(),
        ScriptOutput::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect(),
    }
}
