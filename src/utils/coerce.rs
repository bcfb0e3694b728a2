//! Typed decoding of values read back from the cache and the event bus.
//!
//! Both the click counters and the event timestamps cross process boundaries
//! as loosely typed wire values. These helpers enumerate the accepted
//! representations explicitly and default deterministically on failure,
//! instead of coercing dynamically at call sites.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Decodes a pending-counter value into a non-negative count.
///
/// Accepted representations: an integer, numeric text, or raw byte text as
/// produced by Redis INCR (`"42"`, possibly padded with whitespace).
/// Anything else, including negative values, decodes to `None` and the key
/// is skipped by the reconciler.
pub fn coerce_count(raw: &str) -> Option<i64> {
    let count = raw.trim().parse::<i64>().ok()?;
    if count < 0 {
        return None;
    }
    Some(count)
}

/// Decodes an event timestamp from a JSON value.
///
/// Accepted representations, tried in order:
/// - RFC 3339 text with a UTC or numeric offset (`2024-05-01T12:00:00Z`,
///   `2024-05-01T12:00:00+08:00`)
/// - zone-qualified ISO 8601 text carrying a bracketed zone id after the
///   offset (`2024-05-01T12:00:00+08:00[Asia/Taipei]`); the offset decides
///   the instant, the zone id is dropped
/// - naive local text without an offset (`2024-05-01T12:00:00`,
///   fractional seconds allowed), interpreted as UTC
///
/// Absent or unparseable values decode to `None`; the consumer substitutes
/// its current time.
pub fn coerce_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = value?.as_str()?.trim();
    let text = strip_zone_id(text);

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    None
}

/// Drops a trailing bracketed zone id (`[Asia/Taipei]`), leaving the
/// offset-qualified part for the RFC 3339 parse.
fn strip_zone_id(text: &str) -> &str {
    match (text.ends_with(']'), text.find('[')) {
        (true, Some(open)) => text[..open].trim_end(),
        _ => text,
    }
}
