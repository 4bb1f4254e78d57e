//! Identifier generation for sections and repeatable items.
//!
//! Ids are derived from the wall clock in milliseconds. When two ids are
//! requested within the same millisecond (or a stored id already holds that
//! value) the counter is bumped until it is free.

use chrono::Utc;

/// Current UNIX time in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate an id that `taken` reports as unused.
///
/// With a prefix the id reads `"{prefix}-{millis}"`, otherwise it is the bare
/// millisecond value.
pub fn unique_id(prefix: Option<&str>, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = now_millis();
    loop {
        let candidate = match prefix {
            Some(prefix) => format!("{}-{}", prefix, stamp),
            None => stamp.to_string(),
        };
        if !taken(&candidate) {
            return candidate;
        }
        stamp += 1;
    }
}
