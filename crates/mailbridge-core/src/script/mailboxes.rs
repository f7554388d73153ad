//! Scripts for mailbox and account name listings, plus the access probe.
//!
//! These scripts return native lists; `osascript` prints them as one
//! comma-joined text value. [`crate::wire::parse_name_list`] accepts both.

use mailbridge_osa::escape_literal;

/// Lists the names of every mailbox across all accounts.
#[must_use]
pub fn list_mailboxes() -> String {
    r#"tell application "Mail" to return name of every mailbox"#.to_string()
}

/// Lists the names of every configured account.
#[must_use]
pub fn list_accounts() -> String {
    r#"tell application "Mail" to return name of every account"#.to_string()
}

/// Lists the mailbox names of one account.
#[must_use]
pub fn list_account_mailboxes(account: &str) -> String {
    format!(
        r#"tell application "Mail" to return name of every mailbox of account "{}""#,
        escape_literal(account)
    )
}

/// Harmless no-op query used to probe automation access.
///
/// Fails both when the automation permission is missing and when Mail has
/// no configured account, which are exactly the conditions the access gate
/// reports on.
#[must_use]
pub fn access_probe() -> String {
    r#"tell application "Mail" to return name of first account"#.to_string()
}
