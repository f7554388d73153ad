//! Scripts that mutate a message resolved by subject and sender match.
//!
//! Messages carry no stable handle across this bridge, so each script
//! re-resolves its target: the first message in any of the account's
//! mailboxes whose subject contains the given subject fragment and whose
//! sender contains the given sender fragment.

use mailbridge_osa::escape_literal;

use crate::wire::{ERROR_PREFIX, SUCCESS_PREFIX};

/// Moves the first matching message to the account's archive mailbox.
///
/// The archive mailbox is the first one named `Archive` or
/// `[Gmail]/All Mail`, or whose name contains `Archive`.
#[must_use]
pub fn archive_message(account: &str, subject: &str, sender: &str) -> String {
    move_message(
        account,
        subject,
        sender,
        r#"mbName is "Archive" or mbName is "[Gmail]/All Mail" or mbName contains "Archive""#,
        "archive",
        "Message archived",
    )
}

/// Moves the first matching message to the account's trash mailbox.
///
/// The trash mailbox is the first one named `Trash` or `[Gmail]/Trash`,
/// or whose name contains `Trash`.
#[must_use]
pub fn delete_message(account: &str, subject: &str, sender: &str) -> String {
    move_message(
        account,
        subject,
        sender,
        r#"mbName is "Trash" or mbName is "[Gmail]/Trash" or mbName contains "Trash""#,
        "trash",
        "Message deleted",
    )
}

fn move_message(
    account: &str,
    subject: &str,
    sender: &str,
    condition: &str,
    kind: &str,
    confirmation: &str,
) -> String {
    let account = escape_literal(account);
    let subject = escape_literal(subject);
    let sender = escape_literal(sender);
    format!(
        r#"tell application "Mail"
    set theAccount to account "{account}"
    set targetBox to missing value
    repeat with mb in (mailboxes of theAccount)
        set mbName to (name of mb) as string
        if {condition} then
            set targetBox to mb
            exit repeat
        end if
    end repeat
    if targetBox is missing value then return "{ERROR_PREFIX}No {kind} mailbox found for account {account}"
    repeat with mb in (mailboxes of theAccount)
        try
            set matched to (messages of mb whose subject contains "{subject}" and sender contains "{sender}")
            if (count of matched) > 0 then
                move (item 1 of matched) to targetBox
                return "{SUCCESS_PREFIX}{confirmation}"
            end if
        end try
    end repeat
    return "{ERROR_PREFIX}Message not found"
end tell"#
    )
}

/// Sets the read flag on the first matching message across all mailboxes
/// of the account.
#[must_use]
pub fn mark_message_read(account: &str, subject: &str, sender: &str) -> String {
    let account = escape_literal(account);
    let subject = escape_literal(subject);
    let sender = escape_literal(sender);
    format!(
        r#"tell application "Mail"
    set theAccount to account "{account}"
    repeat with mb in (mailboxes of theAccount)
        try
            set matched to (messages of mb whose subject contains "{subject}" and sender contains "{sender}")
            if (count of matched) > 0 then
                set read status of (item 1 of matched) to true
                return "{SUCCESS_PREFIX}Message marked as read"
            end if
        end try
    end repeat
    return "{ERROR_PREFIX}Message not found"
end tell"#
    )
}
