//! Entry - one assignment of a developer to a service
//!
//! Serialized as `"<timestamp>, <developer>"`, the value half of a data
//! file line. The raw text is kept as read so a load/save cycle never
//! rewrites lines it does not understand.

use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Timestamp layout used by entries and activity log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEPARATOR: &str = ", ";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_stamp() -> String {
    format_stamp(Local::now().naive_local())
}

pub fn format_stamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    raw: String,
}

impl Entry {
    pub fn new(timestamp: &str, developer: &str) -> Self {
        Self {
            raw: format!("{}{}{}", timestamp, SEPARATOR, developer),
        }
    }

    /// Wrap a value read from the data file.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Timestamp part; the whole value when there is no separator.
    pub fn timestamp(&self) -> &str {
        self.raw
            .split_once(SEPARATOR)
            .map(|(ts, _)| ts)
            .unwrap_or(&self.raw)
    }

    pub fn developer(&self) -> Option<&str> {
        self.raw.split_once(SEPARATOR).map(|(_, dev)| dev)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_entry_parts() {
        let entry = Entry::new("2024-01-01 10:00:00", "alice");
        assert_eq!(entry.as_str(), "2024-01-01 10:00:00, alice");
        assert_eq!(entry.timestamp(), "2024-01-01 10:00:00");
        assert_eq!(entry.developer(), Some("alice"));
    }

    #[test]
    fn test_developer_with_comma() {
        let entry = Entry::from_raw("2024-01-01 10:00:00, Doe, Jane");
        assert_eq!(entry.developer(), Some("Doe, Jane"));
    }

    #[test]
    fn test_raw_without_separator() {
        let entry = Entry::from_raw("legacy-value");
        assert_eq!(entry.timestamp(), "legacy-value");
        assert_eq!(entry.developer(), None);
        assert_eq!(entry.to_string(), "legacy-value");
    }

    #[test]
    fn test_format_stamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(format_stamp(at), "2024-03-09 07:05:01");
    }
}
