//! Reply detection: preprocessing helpers and the sent-mailbox lookup.

use mailbridge_osa::escape_literal;

use crate::wire::{ERROR_PREFIX, NO_REPLY_MARKER, SUCCESS_PREFIX};

/// Reply/forward prefixes stripped from an original subject before the
/// containment pattern is built. Matched case-insensitively.
const REPLY_PREFIXES: [&str; 2] = ["re:", "fwd:"];

/// Strips one leading `Re:`/`Fwd:` prefix (any case) and any whitespace
/// following it, so a reply whose subject is `Re: X` is found when the
/// caller passes the reply's own subject as the original.
#[must_use]
pub fn strip_reply_prefix(subject: &str) -> &str {
    for prefix in REPLY_PREFIXES {
        if let Some(head) = subject.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            return subject[prefix.len()..].trim_start();
        }
    }
    subject
}

/// Reduces a `Name <addr>` sender to the bare address.
///
/// Falls back to the raw sender text when no angle-bracket form is present.
#[must_use]
pub fn extract_address(sender: &str) -> &str {
    if let (Some(open), Some(close)) = (sender.find('<'), sender.rfind('>'))
        && open < close
    {
        let address = sender[open + 1..close].trim();
        if !address.is_empty() {
            return address;
        }
    }
    sender
}

/// Looks for a reply in the account's sent mailbox.
///
/// The sent mailbox is recognised by name: equal to `Sent` or
/// `Sent Messages`, containing `Sent Mail`, or the Gmail-style
/// `[Gmail]/Sent Mail` label. A sent message counts as a reply when its
/// subject contains the (already prefix-stripped) original subject and any
/// of its recipients' addresses contains the original sender's address.
/// Returns `SUCCESS:<date sent>` for the first hit, otherwise the
/// [`NO_REPLY_MARKER`].
#[must_use]
pub fn reply_lookup(account: &str, stripped_subject: &str, address: &str) -> String {
    let account = escape_literal(account);
    let subject = escape_literal(stripped_subject);
    let address = escape_literal(address);
    format!(
        r#"tell application "Mail"
    set theAccount to account "{account}"
    set sentBox to missing value
    repeat with mb in (mailboxes of theAccount)
        set mbName to (name of mb) as string
        if mbName is "Sent" or mbName is "Sent Messages" or mbName contains "Sent Mail" or mbName is "[Gmail]/Sent Mail" then
            set sentBox to mb
            exit repeat
        end if
    end repeat
    if sentBox is missing value then return "{ERROR_PREFIX}No sent mailbox found for account {account}"
    repeat with msg in (messages of sentBox whose subject contains "{subject}")
        repeat with recip in (to recipients of msg)
            set recipAddress to (address of recip) as string
            ignoring case
                if recipAddress contains "{address}" then
                    return "{SUCCESS_PREFIX}" & ((date sent of msg) as string)
                end if
            end ignoring
        end repeat
    end repeat
    return "{NO_REPLY_MARKER}"
end tell"#
    )
}
