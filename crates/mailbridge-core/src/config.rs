//! Fixed configuration constants.
//!
//! These are the only state shared between calls; everything else is
//! constructed fresh per operation.

/// Hard ceiling on the number of messages any listing operation returns.
pub const MAX_RESULTS: usize = 20;

/// Default limit for unread/search listings.
pub const DEFAULT_UNREAD_LIMIT: usize = 10;

/// Default limit for the latest-messages listing.
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// Maximum number of characters kept of a message body preview.
pub const PREVIEW_MAX_CHARS: usize = 300;

/// Suffix appended to a truncated preview.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Nominal per-script timeout in seconds.
///
/// Illustrative only: the scripting bridge enforces its own Apple event
/// timeout and this layer does not add one on top.
pub const SCRIPT_TIMEOUT_SECS: u64 = 30;

/// Clamps a requested listing limit to [`MAX_RESULTS`].
#[must_use]
pub fn clamp_limit(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).min(MAX_RESULTS)
}
