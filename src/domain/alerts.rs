//! Capped, newest-first notification list

use std::collections::VecDeque;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::shared::utils::alert_timestamp;

pub const DEFAULT_ALERT_CAPACITY: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub timestamp: String,
    pub text: String,
}

impl fmt::Display for AlertEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.timestamp, self.text)
    }
}

/// Ring buffer of alerts; pushing past capacity evicts the oldest entry
#[derive(Debug, Clone)]
pub struct AlertFeed {
    entries: VecDeque<AlertEntry>,
    capacity: usize,
}

impl AlertFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, text: impl Into<String>) -> &AlertEntry {
        self.push_entry(AlertEntry {
            timestamp: alert_timestamp(),
            text: text.into(),
        })
    }

    pub fn push_entry(&mut self, entry: AlertEntry) -> &AlertEntry {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<AlertEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_exceeds_capacity() {
        let mut feed = AlertFeed::default();
        for i in 0..100 {
            feed.push(format!("alert {}", i));
            assert!(feed.len() <= 12);
        }
        assert_eq!(feed.len(), 12);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut feed = AlertFeed::new(3);
        for text in ["a", "b", "c", "d", "e"] {
            feed.push(text);
        }
        let texts: Vec<&str> = feed.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["e", "d", "c"]);
        assert_eq!(feed.latest().unwrap().text, "e");
    }

    #[test]
    fn test_display_includes_timestamp() {
        let entry = AlertEntry {
            timestamp: "10:15:00".to_string(),
            text: "Market update".to_string(),
        };
        assert_eq!(entry.to_string(), "10:15:00 — Market update");
    }
}
