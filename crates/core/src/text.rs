//! Char-safe truncation and the note identity digest.

use sha2::{Digest, Sha256};

use crate::constants::{CONTENT_HASH_PREFIX_CHARS, URL_HASH_PREFIX_CHARS};

/// Truncate to at most `max_chars` characters without splitting a char.
///
/// Returns the original slice when it is already short enough.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Hex SHA-256 over the (url prefix, content prefix) pair that defines note
/// identity: two saves whose truncated pairs match collapse to one row.
pub fn note_content_hash(source_url: Option<&str>, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(truncate_chars(source_url.unwrap_or(""), URL_HASH_PREFIX_CHARS).as_bytes());
    hasher.update(truncate_chars(content, CONTENT_HASH_PREFIX_CHARS).as_bytes());
    format!("{:x}", hasher.finalize())
}
