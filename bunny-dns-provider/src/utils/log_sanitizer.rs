//! Log sanitization utilities
//!
//! Keeps response bodies (TXT ownership records can be long) and the API key
//! out of debug/error logs in full.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Truncate a string for safe logging.
///
/// Cuts on a char boundary at or below `TRUNCATE_LIMIT` bytes and appends the
/// original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret (API key) for logging, keeping a short prefix for identification.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }
    let prefix: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if prefix.len() == secret.len() {
        "****".to_string()
    } else {
        format!("{prefix}****")
    }
}
