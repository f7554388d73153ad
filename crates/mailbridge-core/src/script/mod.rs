//! AppleScript template builders.
//!
//! Pure functions from operation parameters to script text, unit-testable
//! without a live automation target. Every free-text parameter is passed
//! through [`mailbridge_osa::escape_literal`] before interpolation; numeric
//! limits are clamped by the caller and interpolated as bare literals.

mod listing;
mod mailboxes;
mod mutate;
mod reply;
mod send;

pub use listing::{latest_messages, search_messages, unread_messages};
pub use mailboxes::{access_probe, list_account_mailboxes, list_accounts, list_mailboxes};
pub use mutate::{archive_message, delete_message, mark_message_read};
pub use reply::{extract_address, reply_lookup, strip_reply_prefix};
pub use send::send_message;
