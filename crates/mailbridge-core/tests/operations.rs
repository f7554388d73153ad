//! Integration tests for the mail client operations.
//!
//! These tests drive the full gate → build → invoke → parse pipeline
//! against a fake script runner that records every script it is handed and
//! plays back queued replies, so no live Mail application is needed.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use mailbridge_core::{ACCESS_REMEDIATION, MailClient, wire};
use mailbridge_osa::{Error as OsaError, ScriptOutput, ScriptRunner};

/// Fake runner with canned replies and a script log.
#[derive(Default)]
struct FakeRunner {
    replies: Mutex<VecDeque<mailbridge_osa::Result<ScriptOutput>>>,
    scripts: Mutex<Vec<String>>,
}

impl FakeRunner {
    fn new() -> Self {
        Self::default()
    }

    fn reply_text(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ScriptOutput::Text(text.to_string())));
        self
    }

    fn reply_list(self, items: &[&str]) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ScriptOutput::List(
            items.iter().map(ToString::to_string).collect(),
        )));
        self
    }

    fn reply_err(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(OsaError::Interpreter(message.to_string())));
        self
    }

    fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.scripts.lock().unwrap().len()
    }
}

impl ScriptRunner for FakeRunner {
    async fn run(&self, script: &str) -> mailbridge_osa::Result<ScriptOutput> {
        self.scripts.lock().unwrap().push(script.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ScriptOutput::Text(String::new())))
    }
}

fn client(runner: FakeRunner) -> MailClient<FakeRunner> {
    MailClient::with_runner(runner)
}

fn record(fields: &[&str]) -> String {
    fields.join(wire::FIELD_DELIMITER)
}

/// Path of the staged message body, recovered from the generated script.
fn staged_body_path(script: &str) -> PathBuf {
    let marker = "POSIX file \"";
    let start = script.find(marker).expect("send script reads a POSIX file") + marker.len();
    let rest = &script[start..];
    let end = rest.find('"').expect("path literal is quoted");
    PathBuf::from(&rest[..end])
}

// --- listings ---

#[tokio::test]
async fn unread_parses_delimited_records() {
    let payload = format!(
        "{}{}{}{}",
        record(&["Status", "Alice <alice@example.com>", "Mon Jan 5", "All good", "false"]),
        wire::RECORD_DELIMITER,
        record(&["Invoice", "billing@example.com", "Tue Jan 6", "Past due", "false"]),
        wire::RECORD_DELIMITER,
    );
    let mail = client(FakeRunner::new().reply_text(&format!("SUCCESS:{payload}")));

    let messages = mail.get_unread_mails(None).await;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].subject, "Status");
    assert_eq!(messages[0].sender, "Alice <alice@example.com>");
    assert_eq!(messages[0].mailbox, "Inbox");
    assert!(!messages[0].is_read);
    assert_eq!(messages[1].content, "Past due");
}

#[tokio::test]
async fn unread_limit_is_clamped() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS:"));
    mail.get_unread_mails(Some(500)).await;

    let scripts = mail.runner().scripts();
    assert!(scripts[0].contains("set maxCount to 20"));
}

#[tokio::test]
async fn unread_failure_degrades_to_empty() {
    let mail = client(FakeRunner::new().reply_err("Mail got an error: timed out"));
    assert!(mail.get_unread_mails(None).await.is_empty());
}

#[tokio::test]
async fn search_blank_term_skips_the_bridge() {
    let mail = client(FakeRunner::new());
    assert!(mail.search_mails("", None).await.is_empty());
    assert!(mail.search_mails("   ", None).await.is_empty());
    assert_eq!(mail.runner().call_count(), 0);
}

#[tokio::test]
async fn search_short_records_are_dropped() {
    let payload = format!(
        "{}{}{}",
        record(&["only", "three", "fields"]),
        wire::RECORD_DELIMITER,
        record(&["Report", "bob@example.com", "Wed", "draft attached"]),
    );
    let mail = client(FakeRunner::new().reply_text(&format!("SUCCESS:{payload}")));

    let messages = mail.search_mails("report", None).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].subject, "Report");
}

#[tokio::test]
async fn latest_messages_use_the_inbox_label_convention() {
    let payload = record(&["Hi", "alice@example.com", "Mon", "hello", "true"]);
    let mail = client(FakeRunner::new().reply_text(&format!("SUCCESS:{payload}")));

    let messages = mail.get_latest_mails("Work", None).await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].mailbox, "Work - INBOX");
    assert!(messages[0].is_read);
    // Default limit for the latest listing is 5.
    assert!(mail.runner().scripts()[0].contains("set maxCount to 5"));
}

// --- name listings ---

#[tokio::test]
async fn accounts_accept_native_list_output() {
    let mail = client(FakeRunner::new().reply_list(&["Work", "", "Personal"]));
    assert_eq!(mail.get_accounts().await, vec!["Work", "Personal"]);
}

#[tokio::test]
async fn mailboxes_accept_comma_joined_text() {
    let mail = client(FakeRunner::new().reply_text("INBOX, Sent, Trash"));
    assert_eq!(mail.get_mailboxes().await, vec!["INBOX", "Sent", "Trash"]);
}

#[tokio::test]
async fn account_mailboxes_blank_account_skips_the_bridge() {
    let mail = client(FakeRunner::new());
    assert!(mail.get_mailboxes_for_account("").await.is_empty());
    assert!(mail.get_mailboxes_for_account("  ").await.is_empty());
    assert_eq!(mail.runner().call_count(), 0);
}

// --- access gate ---

#[tokio::test]
async fn access_granted_on_probe_success() {
    let mail = client(FakeRunner::new().reply_text("Work"));
    assert!(mail.check_access().await);
}

#[tokio::test]
async fn access_denied_returns_remediation() {
    let mail = client(FakeRunner::new().reply_err(
        "Mail got an error: Not authorized to send Apple events to Mail. (-1743)",
    ));
    let status = mail.request_access().await;
    assert!(!status.granted);
    assert_eq!(status.message, ACCESS_REMEDIATION);
}

// --- send ---

#[tokio::test]
async fn send_rejects_blank_required_inputs() {
    let mail = client(FakeRunner::new());
    for (to, subject, body) in [
        ("", "s", "b"),
        ("a@example.com", "  ", "b"),
        ("a@example.com", "s", "\t"),
    ] {
        assert!(mail.send_mail(to, subject, body, None, None).await.is_err());
    }
    assert_eq!(mail.runner().call_count(), 0);
}

#[tokio::test]
async fn send_invokes_once_and_confirms_recipient_and_subject() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS"));
    let confirmation = mail
        .send_mail("alice@example.com", "Quarterly report", "See attached.", None, None)
        .await
        .expect("send should succeed");

    assert!(confirmation.contains("alice@example.com"));
    assert!(confirmation.contains("Quarterly report"));
    assert_eq!(mail.runner().call_count(), 1);
}

#[tokio::test]
async fn send_removes_the_staged_body_on_success() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS"));
    mail.send_mail("alice@example.com", "Hi", "body text", None, None)
        .await
        .expect("send should succeed");

    let path = staged_body_path(&mail.runner().scripts()[0]);
    assert!(!path.exists());
}

#[tokio::test]
async fn send_removes_the_staged_body_on_failure() {
    let mail = client(FakeRunner::new().reply_err("Mail got an error: send failed"));
    let result = mail
        .send_mail("alice@example.com", "Hi", "body text", None, None)
        .await;

    assert!(result.is_err());
    let path = staged_body_path(&mail.runner().scripts()[0]);
    assert!(!path.exists());
}

#[tokio::test]
async fn send_error_reply_propagates() {
    let mail = client(FakeRunner::new().reply_text("ERROR:no outgoing account"));
    let result = mail
        .send_mail("alice@example.com", "Hi", "body", None, None)
        .await;
    assert!(result.is_err());
}

// --- mutations ---

#[tokio::test]
async fn archive_error_reply_is_structured_failure() {
    let mail = client(FakeRunner::new().reply_text("ERROR:boom"));
    let outcome = mail
        .archive_email("Work", "Status", "alice@example.com")
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "boom");
}

#[tokio::test]
async fn archive_success_reply_is_structured_success() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS:Message archived"));
    let outcome = mail
        .archive_email("Work", "Status", "alice@example.com")
        .await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Message archived");
}

#[tokio::test]
async fn delete_and_mark_read_report_their_confirmations() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS:Message deleted"));
    let outcome = mail.delete_email("Work", "Status", "a@example.com").await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Message deleted");

    let mail = client(FakeRunner::new().reply_text("SUCCESS:Message marked as read"));
    let outcome = mail.mark_as_read("Work", "Status", "a@example.com").await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Message marked as read");
}

#[tokio::test]
async fn mutation_with_blank_target_fails_without_invoking() {
    let mail = client(FakeRunner::new());
    let outcome = mail.archive_email("Work", "", "a@example.com").await;
    assert!(!outcome.success);
    assert_eq!(mail.runner().call_count(), 0);
}

#[tokio::test]
async fn mutation_access_denial_carries_remediation() {
    let mail = client(FakeRunner::new().reply_err(
        "Mail got an error: Not authorized to send Apple events to Mail. (-1743)",
    ));
    let outcome = mail
        .archive_email("Work", "Status", "alice@example.com")
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, ACCESS_REMEDIATION);
}

// --- reply detection ---

#[tokio::test]
async fn replied_builds_pattern_from_stripped_subject_and_bare_address() {
    let mail = client(FakeRunner::new().reply_text("NO_REPLY"));
    mail.check_if_replied("Work", "Re: Project update", "Alice <Alice@Example.com>")
        .await;

    let scripts = mail.runner().scripts();
    let script = &scripts[0];
    assert!(script.contains(r#"subject contains "Project update""#));
    assert!(!script.contains("Re: Project update"));
    assert!(script.contains(r#"contains "Alice@Example.com""#));
}

#[tokio::test]
async fn replied_success_carries_the_sent_date() {
    let mail = client(FakeRunner::new().reply_text("SUCCESS:Monday, 5 January 2026 at 10:30"));
    let status = mail
        .check_if_replied("Work", "Project update", "alice@example.com")
        .await;

    assert!(status.replied);
    assert_eq!(
        status.reply_sent_at.as_deref(),
        Some("Monday, 5 January 2026 at 10:30")
    );
}

#[tokio::test]
async fn replied_no_match_and_error_are_both_negative() {
    let mail = client(FakeRunner::new().reply_text("NO_REPLY"));
    let missed = mail
        .check_if_replied("Work", "Project update", "alice@example.com")
        .await;
    assert!(!missed.replied);
    assert!(missed.reply_sent_at.is_none());

    let mail = client(FakeRunner::new().reply_text("ERROR:No sent mailbox found for account Work"));
    let errored = mail
        .check_if_replied("Work", "Project update", "alice@example.com")
        .await;
    assert!(!errored.replied);
    assert_eq!(errored.message, "No sent mailbox found for account Work");
    // The two negatives differ only by message text.
    assert_ne!(missed.message, errored.message);
}
