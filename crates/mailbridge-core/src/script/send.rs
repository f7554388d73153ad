//! Script for composing and sending an outgoing message.

use std::fmt::Write as _;

use mailbridge_osa::escape_literal;

use crate::wire::SUCCESS_BARE;

/// Composes and sends one message.
///
/// The body is read from `body_path` inside the script rather than being
/// interpolated, so multi-line or quote-heavy bodies cannot break the
/// script text. The caller owns the file and removes it after the
/// invocation returns. The cc/bcc clauses are omitted entirely when the
/// corresponding address is absent.
#[must_use]
pub fn send_message(
    to: &str,
    subject: &str,
    body_path: &str,
    cc: Option<&str>,
    bcc: Option<&str>,
) -> String {
    let to = escape_literal(to);
    let subject = escape_literal(subject);
    let body_path = escape_literal(body_path);

    let mut recipients = format!(
        "        make new to recipient at end of to recipients with properties {{address:\"{to}\"}}\n"
    );
    if let Some(cc) = cc {
        let _ = writeln!(
            recipients,
            "        make new cc recipient at end of cc recipients with properties {{address:\"{}\"}}",
            escape_literal(cc)
        );
    }
    if let Some(bcc) = bcc {
        let _ = writeln!(
            recipients,
            "        make new bcc recipient at end of bcc recipients with properties {{address:\"{}\"}}",
            escape_literal(bcc)
        );
    }

    format!(
        r#"set bodyText to read (POSIX file "{body_path}") as «class utf8»
tell application "Mail"
    set outgoing to make new outgoing message with properties {{subject:"{subject}", content:bodyText, visible:false}}
    tell outgoing
{recipients}        send
    end tell
end tell
return "{SUCCESS_BARE}""#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_read_from_file() {
        let script = send_message("a@example.com", "Hi", "/tmp/body.txt", None, None);
        assert!(script.contains(r#"read (POSIX file "/tmp/body.txt")"#));
        assert!(!script.contains("content:\""));
    }

    #[test]
    fn cc_and_bcc_omitted_when_absent() {
        let script = send_message("a@example.com", "Hi", "/tmp/body.txt", None, None);
        assert!(!script.contains("cc recipient"));
        assert!(!script.contains("bcc recipient"));
    }

    #[test]
    fn cc_and_bcc_rendered_when_present() {
        let script = send_message(
            "a@example.com",
            "Hi",
            "/tmp/body.txt",
            Some("c@example.com"),
            Some("b@example.com"),
        );
        assert!(script.contains(r#"cc recipients with properties {address:"c@example.com"}"#));
        assert!(script.contains(r#"bcc recipients with properties {address:"b@example.com"}"#));
    }

    #[test]
    fn subject_is_escaped() {
        let script = send_message("a@example.com", r#"a "quoted" subject"#, "/tmp/b", None, None);
        assert!(script.contains(r#"subject:"a \"quoted\" subject""#));
    }
}
