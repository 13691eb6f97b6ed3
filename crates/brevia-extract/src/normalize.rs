//! Post-extraction text normalization, applied uniformly to all formats.

use brevia_core::{Error, Result};

/// Maximum characters kept after normalization.
pub const MAX_EXTRACT_CHARS: usize = 50_000;
/// Minimum characters required for a summarizable document.
pub const MIN_TEXT_CHARS: usize = 20;

/// Collapse whitespace runs to single spaces, trim, enforce the length floor,
/// and truncate to [`MAX_EXTRACT_CHARS`].
pub fn normalize(raw: &str) -> Result<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() < MIN_TEXT_CHARS {
        return Err(Error::TooShort);
    }
    Ok(truncate_chars(collapsed, MAX_EXTRACT_CHARS))
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}
