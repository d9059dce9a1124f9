//! Utility functions and helpers.

pub mod http;
pub mod log;

use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

/// Extract the period identifier from a period token.
///
/// Period tokens have the shape `"<periodId>-<label>"`; only the portion
/// before the first `-` is the identifier. A token without a `-` is taken
/// as a bare identifier. Empty tokens yield `None`.
pub fn period_id(token: &str) -> Option<&str> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    match token.split_once('-') {
        Some((id, _label)) => Some(id),
        None => Some(token),
    }
}

/// Parse a raw count string into a non-negative count.
///
/// Empty or non-numeric input parses to 0; negative values clamp to 0.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<i64>().unwrap_or(0).max(0).min(u32::MAX as i64) as u32
}

/// Truncate a string to at most `max` grapheme clusters, appending an
/// ellipsis when shortened.
pub fn truncate_graphemes(s: &str, max: usize) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if graphemes.len() <= max {
        s.to_string()
    } else {
        let mut out: String = graphemes[..max].concat();
        out.push('…');
        out
    }
}

/// Generate the per-process origin marker.
///
/// The marker is sent with every mutating API call and compared against
/// the `origin` field of inbound change events to suppress self-echo.
/// Hashing host, pid, and startup instant keeps two clients on the same
/// machine from ever sharing a marker.
pub fn origin_marker() -> String {
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "local".to_string());
    let pid = std::process::id();
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(host.as_bytes());
    hasher.update(pid.to_le_bytes());
    hasher.update(nanos.to_le_bytes());
    let digest = hasher.finalize();

    hex::encode(&digest[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_id() {
        assert_eq!(period_id("2026A-First Term"), Some("2026A"));
        assert_eq!(period_id("p7-Spring-Late"), Some("p7"));
        assert_eq!(period_id("bare"), Some("bare"));
        assert_eq!(period_id(""), None);
        assert_eq!(period_id("   "), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("  12 "), 12);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("3.5"), 0);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("short", 10), "short");
        assert_eq!(truncate_graphemes("abcdef", 3), "abc…");
        // Combining characters count as one grapheme
        assert_eq!(truncate_graphemes("e\u{301}x", 1), "e\u{301}…");
    }

    #[test]
    fn test_origin_marker_shape() {
        let marker = origin_marker();
        assert_eq!(marker.len(), 12);
        assert!(marker.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
