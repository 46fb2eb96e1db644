//! Comment identifier generation.
//!
//! Identifiers are a function of the submission: the hex-encoded MD5 digest
//! of `timestamp ‖ video_id ‖ content`. Two writes for the same video with
//! identical content inside the same timestamp resolution collide; the
//! database's primary-key constraint is the backstop for that accepted
//! weak-uniqueness property.

use chrono::{SecondsFormat, Utc};
use md5::{Digest, Md5};

/// Derives the identifier for a comment from its submission timestamp, the
/// video it belongs to, and its text.
///
/// Deterministic: the same three inputs always produce the same identifier.
#[must_use]
pub fn comment_id(timestamp: &str, video_id: &str, content: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(video_id.as_bytes());
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Renders the current wall clock as the timestamp text stored with a
/// comment and fed into [`comment_id`]. Microsecond resolution bounds the
/// collision window for identical submissions.
#[must_use]
pub fn submission_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic() {
        let a = comment_id("2026-01-01T00:00:00Z", "v1", "hello");
        let b = comment_id("2026-01-01T00:00:00Z", "v1", "hello");
        assert_eq!(a, b);
    }

    #[test]
    fn id_is_hex_md5_of_concatenation() {
        // MD5 of the empty string; all three parts empty concatenate to it.
        assert_eq!(comment_id("", "", ""), "d41d8cd98f00b204e9800998ecf8427e");
        // Splitting the same bytes differently across the parts must not
        // change the digest.
        assert_eq!(
            comment_id("ab", "cd", "ef"),
            comment_id("abcd", "ef", ""),
        );
    }

    #[test]
    fn id_shape() {
        let id = comment_id("2026-01-01T00:00:00Z", "v1", "hello");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_inputs_diverge() {
        let base = comment_id("2026-01-01T00:00:00Z", "v1", "hello");
        assert_ne!(base, comment_id("2026-01-01T00:00:00Z", "v2", "hello"));
        assert_ne!(base, comment_id("2026-01-01T00:00:00Z", "v1", "hello!"));
        assert_ne!(base, comment_id("2026-01-01T00:00:01Z", "v1", "hello"));
    }

    #[test]
    fn submission_timestamp_parses_back() {
        let ts = submission_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
