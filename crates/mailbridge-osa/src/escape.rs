//! Quoting of free text for AppleScript string literals.

/// Escapes a free-text value for interpolation into a double-quoted
/// AppleScript string literal.
///
/// Backslashes are escaped before quotes so that the backslashes introduced
/// for the quotes are not themselves escaped a second time. Every piece of
/// caller-supplied text (subjects, senders, account names, addresses, file
/// paths) must pass through this single helper before it is substituted into
/// a script template; nothing else guards against script injection.
///
/// # Example
///
/// ```
/// use mailbridge_osa::escape_literal;
///
/// assert_eq!(escape_literal(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape_literal(r"C:\temp"), r"C:\\temp");
/// ```
#[must_use]
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}
