//! Activity log: bounded, most-recent-first

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A timestamp-free log message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry {
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Most-recent-first log that drops its oldest entries past capacity.
///
/// Only built through [`ActivityLog::push`], so it never holds more than `capacity` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Log holding at most [`kpisim_common::MAX_LOG_ENTRIES`] entries
    pub fn new() -> Self {
        Self::with_capacity(kpisim_common::MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a message, evicting the oldest if over capacity
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            message: message.into(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Messages, newest first
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = ActivityLog::new();
        log.push("first");
        log.push("second");
        assert_eq!(log.messages(), vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().message, "second");
    }

    #[test]
    fn test_drops_oldest_past_capacity() {
        let mut log = ActivityLog::new();
        for i in 0..15 {
            log.push(format!("entry {}", i));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.messages()[0], "entry 14");
        assert_eq!(log.messages()[9], "entry 5");
    }

    #[test]
    fn test_custom_capacity() {
        let mut log = ActivityLog::with_capacity(2);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.messages(), vec!["c", "b"]);
        assert_eq!(log.capacity(), 2);
    }

    #[test]
    fn test_serialized_log_stays_within_capacity() {
        let mut log = ActivityLog::with_capacity(3);
        for i in 0..5 {
            log.push(format!("entry {}", i));
        }
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["capacity"], 3);
        assert_eq!(
            json["entries"],
            serde_json::json!(["entry 4", "entry 3", "entry 2"])
        );
    }

    #[test]
    fn test_entry_serializes_as_string() {
        let entry = LogEntry {
            message: "Scenario changed to Balanced".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            "\"Scenario changed to Balanced\""
        );
    }
}
