//! The mail client: one public method per automation operation.
//!
//! Failure policy, per operation class:
//! - read/query operations degrade to an empty list on any bridge or
//!   script failure, logged at `warn` level so listing failures never
//!   crash callers;
//! - mutating operations (archive, delete, mark-read, reply-check) report
//!   structured failure results;
//! - [`MailClient::send_mail`] propagates its error, because a silent
//!   failure to deliver would be unacceptable.
//!
//! No retries anywhere; every failure is terminal for that call.

use std::io::Write as _;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use mailbridge_osa::{OsaScriptRunner, ScriptOutput, ScriptRunner};

use crate::config::{DEFAULT_LATEST_LIMIT, DEFAULT_UNREAD_LIMIT, clamp_limit};
use crate::error::{Error, Result};
use crate::model::{AccessStatus, EmailMessage, OperationOutcome, ReplyStatus};
use crate::script;
use crate::wire::{self, NO_REPLY_MARKER, Reply};

/// Remediation instructions returned whenever automation access is denied.
pub const ACCESS_REMEDIATION: &str = "\
Mail automation access is not granted. To fix this:
1. Open System Settings > Privacy & Security > Automation
2. Allow this process to control Mail
3. Make sure Mail is running and has at least one account configured
4. Restart this process and try again";

/// Client for the mail application, generic over the script runner so the
/// whole operation surface is testable against a fake.
#[derive(Debug, Clone)]
pub struct MailClient<R> {
    runner: R,
}

impl MailClient<OsaScriptRunner> {
    /// Creates a client backed by the system `osascript` interpreter.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_runner(OsaScriptRunner::new())
    }
}

impl Default for MailClient<OsaScriptRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ScriptRunner> MailClient<R> {
    /// Creates a client backed by the given runner.
    #[must_use]
    pub const fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the underlying runner.
    ///
    /// Mainly useful in tests, to inspect a recording fake.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    // --- access gate ---

    /// Returns whether the mail application can currently be scripted.
    pub async fn check_access(&self) -> bool {
        self.request_access().await.granted
    }

    /// Probes automation access with a harmless query.
    ///
    /// On failure (permission denied, Mail not running, no account
    /// configured) the status carries the fixed remediation instructions.
    pub async fn request_access(&self) -> AccessStatus {
        match self.invoke(&script::access_probe()).await {
            Ok(_) => AccessStatus {
                granted: true,
                message: "Mail access is granted.".to_string(),
            },
            Err(err) => {
                debug!(error = %err, "access probe failed");
                AccessStatus {
                    granted: false,
                    message: ACCESS_REMEDIATION.to_string(),
                }
            }
        }
    }

    // --- read/query operations ---

    /// Lists unread messages from the inbox, newest first.
    ///
    /// `limit` defaults to 10 and is clamped to the configured maximum.
    pub async fn get_unread_mails(&self, limit: Option<usize>) -> Vec<EmailMessage> {
        let limit = clamp_limit(limit, DEFAULT_UNREAD_LIMIT);
        self.listing(&script::unread_messages(limit), "Inbox", "unread listing")
            .await
    }

    /// Lists inbox messages whose subject contains `term`.
    ///
    /// An empty or whitespace-only term yields an empty list without
    /// touching the bridge.
    pub async fn search_mails(&self, term: &str, limit: Option<usize>) -> Vec<EmailMessage> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let limit = clamp_limit(limit, DEFAULT_UNREAD_LIMIT);
        self.listing(&script::search_messages(term, limit), "Inbox", "search")
            .await
    }

    /// Lists the latest messages of one account.
    ///
    /// `limit` defaults to 5. Results are labelled `"<account> - INBOX"`
    /// even when the script fell back to the account's first mailbox; the
    /// label is a compatibility artifact, not a statement of which mailbox
    /// was read.
    pub async fn get_latest_mails(&self, account: &str, limit: Option<usize>) -> Vec<EmailMessage> {
        if account.trim().is_empty() {
            return Vec::new();
        }
        let limit = clamp_limit(limit, DEFAULT_LATEST_LIMIT);
        let label = format!("{account} - INBOX");
        self.listing(&script::latest_messages(account, limit), &label, "latest listing")
            .await
    }

    /// Lists the names of every mailbox across all accounts.
    pub async fn get_mailboxes(&self) -> Vec<String> {
        self.names(&script::list_mailboxes(), "mailbox listing").await
    }

    /// Lists the names of every configured account.
    pub async fn get_accounts(&self) -> Vec<String> {
        self.names(&script::list_accounts(), "account listing").await
    }

    /// Lists the mailbox names of one account.
    ///
    /// An empty or whitespace-only account name yields an empty list
    /// without touching the bridge.
    pub async fn get_mailboxes_for_account(&self, account: &str) -> Vec<String> {
        if account.trim().is_empty() {
            return Vec::new();
        }
        self.names(&script::list_account_mailboxes(account), "account mailbox listing")
            .await
    }

    // --- send ---

    /// Composes and sends a message.
    ///
    /// The body is staged in a temporary file that the generated script
    /// reads back, and the file is removed (best-effort) once the
    /// invocation returns, on every exit path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `to`, `subject` or `body` is
    /// empty or whitespace-only, [`Error::AccessDenied`] when automation
    /// access is missing, and [`Error::Osa`]/[`Error::Script`] when the
    /// bridge or the script itself fails. Unlike the query operations,
    /// nothing is swallowed here.
    pub async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        cc: Option<&str>,
        bcc: Option<&str>,
    ) -> Result<String> {
        for (value, name) in [(to, "to"), (subject, "subject"), (body, "body")] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "`{name}` must not be empty or whitespace-only"
                )));
            }
        }
        let cc = cc.filter(|addr| !addr.trim().is_empty());
        let bcc = bcc.filter(|addr| !addr.trim().is_empty());

        let mut body_file = NamedTempFile::new()?;
        body_file.write_all(body.as_bytes())?;
        body_file.flush()?;
        let body_path = body_file.path().to_string_lossy().into_owned();

        let outcome = self
            .invoke(&script::send_message(to, subject, &body_path, cc, bcc))
            .await;
        // Dropping the handle unlinks the staged body regardless of how the
        // invocation went; removal errors are ignored.
        drop(body_file);
        let output = outcome?;

        match parse_text_reply(&output)? {
            Reply::Success(_) => {
                info!(to, subject, "message sent");
                Ok(format!("Message sent to {to} with subject \"{subject}\""))
            }
            Reply::Error(message) => Err(Error::Script(message)),
            Reply::Other(other) => Err(Error::UnexpectedReply(other)),
        }
    }

    // --- mutating operations ---

    /// Moves a message to the account's archive mailbox.
    ///
    /// The target is re-resolved at call time as the first message whose
    /// subject and sender contain the given fragments.
    pub async fn archive_email(
        &self,
        account: &str,
        subject: &str,
        sender: &str,
    ) -> OperationOutcome {
        match validate_target(account, subject, sender) {
            Ok(()) => {
                self.mutation(&script::archive_message(account, subject, sender))
                    .await
            }
            Err(message) => OperationOutcome::failure(message),
        }
    }

    /// Moves a message to the account's trash mailbox.
    pub async fn delete_email(
        &self,
        account: &str,
        subject: &str,
        sender: &str,
    ) -> OperationOutcome {
        match validate_target(account, subject, sender) {
            Ok(()) => {
                self.mutation(&script::delete_message(account, subject, sender))
                    .await
            }
            Err(message) => OperationOutcome::failure(message),
        }
    }

    /// Sets the read flag on the first matching message across all
    /// mailboxes of the account.
    pub async fn mark_as_read(
        &self,
        account: &str,
        subject: &str,
        sender: &str,
    ) -> OperationOutcome {
        match validate_target(account, subject, sender) {
            Ok(()) => {
                self.mutation(&script::mark_message_read(account, subject, sender))
                    .await
            }
            Err(message) => OperationOutcome::failure(message),
        }
    }

    /// Checks whether a message was replied to from this account.
    ///
    /// The original subject is stripped of one leading `Re:`/`Fwd:` prefix
    /// and the original sender reduced to a bare address before the sent
    /// mailbox is searched. No-match and lookup failure both come back as
    /// `replied = false`, distinguishable only by the message text.
    pub async fn check_if_replied(
        &self,
        account: &str,
        subject: &str,
        sender: &str,
    ) -> ReplyStatus {
        if let Err(message) = validate_target(account, subject, sender) {
            return ReplyStatus::not_replied(message);
        }

        let stripped = script::strip_reply_prefix(subject);
        let address = script::extract_address(sender);
        let lookup = self
            .invoke(&script::reply_lookup(account, stripped, address))
            .await
            .and_then(|output| parse_text_reply(&output));

        match lookup {
            Ok(Reply::Success(date)) => ReplyStatus {
                replied: true,
                message: format!("A reply was sent on {date}"),
                reply_sent_at: Some(date),
            },
            Ok(Reply::Other(marker)) if marker == NO_REPLY_MARKER => {
                ReplyStatus::not_replied("No reply found in the sent mailbox")
            }
            Ok(Reply::Error(message)) => ReplyStatus::not_replied(message),
            Ok(Reply::Other(other)) => {
                ReplyStatus::not_replied(format!("Unexpected reply from Mail: {other}"))
            }
            Err(err) => ReplyStatus::not_replied(err.to_string()),
        }
    }

    // --- plumbing ---

    /// One bridge round trip, with access-denial classification.
    async fn invoke(&self, script: &str) -> Result<ScriptOutput> {
        debug!(bytes = script.len(), "invoking script");
        self.runner.run(script).await.map_err(|err| {
            if let mailbridge_osa::Error::Interpreter(message) = &err
                && is_permission_error(message)
            {
                return Error::AccessDenied(ACCESS_REMEDIATION.to_string());
            }
            Error::Osa(err)
        })
    }

    /// Runs a listing script and decodes its delimited records, degrading
    /// to an empty list on failure.
    async fn listing(&self, script: &str, mailbox: &str, what: &str) -> Vec<EmailMessage> {
        let result = self.invoke(script).await.and_then(|output| {
            match parse_text_reply(&output)? {
                Reply::Success(payload) => Ok(wire::parse_message_records(&payload, mailbox)),
                Reply::Error(message) => Err(Error::Script(message)),
                Reply::Other(other) => Err(Error::UnexpectedReply(other)),
            }
        });
        match result {
            Ok(messages) => messages,
            Err(err) => {
                warn!(error = %err, "{what} failed; returning an empty list");
                Vec::new()
            }
        }
    }

    /// Runs a name-listing script, degrading to an empty list on failure.
    async fn names(&self, script: &str, what: &str) -> Vec<String> {
        match self.invoke(script).await {
            Ok(output) => wire::parse_name_list(&output),
            Err(err) => {
                warn!(error = %err, "{what} failed; returning an empty list");
                Vec::new()
            }
        }
    }

    /// Runs a mutation script and folds every failure into a structured
    /// outcome.
    async fn mutation(&self, script: &str) -> OperationOutcome {
        let reply = self
            .invoke(script)
            .await
            .and_then(|output| parse_text_reply(&output));
        match reply {
            Ok(Reply::Success(message)) => OperationOutcome::success(message),
            Ok(Reply::Error(message)) => OperationOutcome::failure(message),
            Ok(Reply::Other(other)) => {
                OperationOutcome::failure(format!("Unexpected reply from Mail: {other}"))
            }
            Err(err) => OperationOutcome::failure(err.to_string()),
        }
    }
}

/// Decodes a sentinel reply from output that must be textual.
fn parse_text_reply(output: &ScriptOutput) -> Result<Reply> {
    let text = output
        .as_text()
        .ok_or_else(|| Error::UnexpectedReply("expected text, got a native list".to_string()))?;
    Ok(wire::parse_reply(text))
}

/// Validates the account/subject/sender triple shared by the mutating
/// operations.
fn validate_target(account: &str, subject: &str, sender: &str) -> std::result::Result<(), String> {
    if account.trim().is_empty() || subject.trim().is_empty() || sender.trim().is_empty() {
        return Err("account, subject and sender are all required".to_string());
    }
    Ok(())
}

/// Recognises interpreter messages that mean the automation permission is
/// missing or the application cannot be reached, e.g.
/// `Not authorized to send Apple events to Mail. (-1743)` or the
/// application-not-running error `(-600)`.
fn is_permission_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("(-1743)")
        || lower.contains("(-600)")
        || lower.contains("not authorized")
        || lower.contains("not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_errors_recognised() {
        assert!(is_permission_error(
            "Mail got an error: Not authorized to send Apple events to Mail. (-1743)"
        ));
        assert!(is_permission_error("Application isn't running. (-600)"));
        assert!(!is_permission_error("Mail got an error: some other problem"));
    }

    #[test]
    fn target_validation_rejects_blank_fields() {
        assert!(validate_target("Work", "Status", " ").is_err());
        assert!(validate_target("", "Status", "a@example.com").is_err());
        assert!(validate_target("Work", "Status", "a@example.com").is_ok());
    }
}
