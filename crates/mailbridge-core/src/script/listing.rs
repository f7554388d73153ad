//! Scripts that list messages as delimited records.

use mailbridge_osa::escape_literal;

use crate::wire::{FIELD_DELIMITER, RECORD_DELIMITER, SUCCESS_PREFIX};

/// Lists unread messages from the unified inbox.
#[must_use]
pub fn unread_messages(limit: usize) -> String {
    render_listing(
        "set matchedMessages to (messages of inbox whose read status is false)",
        limit,
    )
}

/// Lists inbox messages whose subject contains `term`.
///
/// AppleScript's `contains` compares text case-insensitively by default,
/// which is exactly the matching rule we want.
#[must_use]
pub fn search_messages(term: &str, limit: usize) -> String {
    let setup = format!(
        "set matchedMessages to (messages of inbox whose subject contains \"{}\")",
        escape_literal(term)
    );
    render_listing(&setup, limit)
}

/// Lists the most recent messages of one account.
///
/// Reads the account's `INBOX` mailbox, falling back to the account's first
/// mailbox when no mailbox of that name exists.
#[must_use]
pub fn latest_messages(account: &str, limit: usize) -> String {
    let account = escape_literal(account);
    let setup = format!(
        "set theAccount to account \"{account}\"\n    \
         try\n        \
         set targetBox to mailbox \"INBOX\" of theAccount\n    \
         on error\n        \
         set targetBox to first mailbox of theAccount\n    \
         end try\n    \
         set matchedMessages to (messages of targetBox)"
    );
    render_listing(&setup, limit)
}

/// Renders the shared record-building loop around a `matchedMessages`
/// selection statement.
fn render_listing(setup: &str, limit: usize) -> String {
    format!(
        r#"tell application "Mail"
    set fieldSep to "{FIELD_DELIMITER}"
    set recordSep to "{RECORD_DELIMITER}"
    set outputText to ""
    {setup}
    set maxCount to {limit}
    if (count of matchedMessages) < maxCount then set maxCount to (count of matchedMessages)
    repeat with i from 1 to maxCount
        set msg to item i of matchedMessages
        set msgSubject to ""
        try
            set msgSubject to (subject of msg) as string
        end try
        set msgSender to ""
        try
            set msgSender to (sender of msg) as string
        end try
        set msgDate to ""
        try
            set msgDate to (date sent of msg) as string
        end try
        set msgContent to ""
        try
            set msgContent to (content of msg) as string
        end try
        set readFlag to "false"
        try
            if read status of msg then set readFlag to "true"
        end try
        set outputText to outputText & msgSubject & fieldSep & msgSender & fieldSep & msgDate & fieldSep & msgContent & fieldSep & readFlag & recordSep
    end repeat
    return "{SUCCESS_PREFIX}" & outputText
end tell"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unread_interpolates_limit() {
        let script = unread_messages(10);
        assert!(script.contains("set maxCount to 10"));
        assert!(script.contains("read status is false"));
    }

    #[test]
    fn search_escapes_term() {
        let script = search_messages(r#"say "hi""#, 5);
        assert!(script.contains(r#"subject contains "say \"hi\"""#));
    }

    #[test]
    fn listing_emits_wire_delimiters() {
        let script = unread_messages(10);
        assert!(script.contains(FIELD_DELIMITER));
        assert!(script.contains(RECORD_DELIMITER));
        assert!(script.contains(SUCCESS_PREFIX));
    }

    #[test]
    fn latest_falls_back_to_first_mailbox() {
        let script = latest_messages("Work", 5);
        assert!(script.contains(r#"set theAccount to account "Work""#));
        assert!(script.contains(r#"mailbox "INBOX" of theAccount"#));
        assert!(script.contains("set targetBox to first mailbox of theAccount"));
    }
}
