//! Common utilities

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;
use std::time::Instant;

/// Get file modification time as an RFC 3339 timestamp
pub fn get_mtime_rfc3339(path: &Path) -> std::io::Result<String> {
    let metadata = std::fs::metadata(path)?;
    let mtime: DateTime<Utc> = metadata.modified()?.into();
    Ok(mtime.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

/// Truncate string to max chars, returning (truncated_string, was_truncated)
pub fn truncate_chars(s: &str, max_chars: usize) -> (String, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (s[..end].to_string(), true),
        None => (s.to_string(), false),
    }
}

/// Get elapsed milliseconds since a start instant
pub fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
