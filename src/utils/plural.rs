//! Count formatting for log lines.

/// `1 document`, `3 documents`, `0 links`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
