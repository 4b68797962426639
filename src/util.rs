//! Shared utility functions

use sha2::{Digest, Sha256};
use unicode_width::UnicodeWidthChar;

/// Short, stable fingerprint of an email address for logs
///
/// Lowercased and trimmed before hashing so the same mailbox always maps to
/// the same value. Never log the address itself.
pub fn email_fingerprint(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)[..12].to_string()
}

/// Keep the last `max_width` display columns of `s`
///
/// Used for single-line inputs that scroll as the user types.
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &s[start..]
}
