//! Shared helpers for timestamps, tags and request paths.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a server timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`), a naive datetime
/// (`2024-01-01T10:00:00`, read as UTC) and a bare date (`2024-01-01`,
/// read as midnight UTC). Anything else yields `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort tags lexicographically (byte order, like a default JS sort on ASCII).
pub fn sorted_tags(tags: &[String]) -> Vec<String> {
    let mut tags = tags.to_vec();
    tags.sort();
    tags
}

/// Percent-encode an identifier for use as a single path segment.
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Add `id` to `set` when `present` is true and it is missing; remove every
/// occurrence when `present` is false. Returns whether the set changed.
pub fn toggle_membership(set: &mut Vec<String>, id: &str, present: bool) -> bool {
    if present {
        if set.iter().any(|s| s == id) {
            return false;
        }
        set.push(id.to_string());
        true
    } else {
        let before = set.len();
        set.retain(|s| s != id);
        before != set.len()
    }
}
