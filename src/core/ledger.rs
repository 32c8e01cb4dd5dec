//! Ledger - in-memory mapping of service name to assignment history
//!
//! # Key Points
//! - Histories are newest-first: `add` inserts at the front.
//! - A service whose history becomes empty is removed, never kept empty.
//! - Services keep the order they were first seen in, so rewriting the
//!   data file does not shuffle it.
//!
//! The text form is one `"<service>: <entry>"` line per entry, split on
//! the first `:` when parsing.

use super::entry::Entry;
use super::error::{RecordsError, Result};

/// Result of parsing data file text.
#[derive(Debug, Default)]
pub struct Parsed {
    pub ledger: Ledger,
    /// Non-blank lines that had no `:` or an empty service name.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    services: Vec<(String, Vec<Entry>)>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Parsed {
        let mut parsed = Parsed::default();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once(':') {
                Some((service, value)) if !service.trim().is_empty() => {
                    parsed
                        .ledger
                        .history_mut(service.trim())
                        .push(Entry::from_raw(value.trim()));
                }
                _ => parsed.skipped.push(line.to_string()),
            }
        }

        parsed
    }

    /// Render the data file text, one line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (service, entries) in &self.services {
            for entry in entries {
                out.push_str(service);
                out.push_str(": ");
                out.push_str(entry.as_str());
                out.push('\n');
            }
        }
        out
    }

    /// Record `developer` as the newest assignee of `service`.
    pub fn add(&mut self, service: &str, developer: &str, timestamp: &str) -> Result<&Entry> {
        let service = service.trim();
        let developer = developer.trim();

        if service.is_empty() {
            return Err(RecordsError::EmptyInput("API name"));
        }
        if developer.is_empty() {
            return Err(RecordsError::EmptyInput("developer name"));
        }
        if service.contains(':') {
            return Err(RecordsError::InvalidServiceName(service.to_string()));
        }

        let history = self.history_mut(service);
        history.insert(0, Entry::new(timestamp, developer));
        Ok(&history[0])
    }

    pub fn get(&self, service: &str) -> Option<&[Entry]> {
        self.services
            .iter()
            .find(|(name, _)| name == service)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn latest(&self, service: &str) -> Option<&Entry> {
        self.get(service).and_then(|entries| entries.first())
    }

    /// Remove the newest entry of `service`, dropping the service when it
    /// was the last one.
    pub fn remove_latest(&mut self, service: &str) -> Option<Entry> {
        let idx = self.services.iter().position(|(name, _)| name == service)?;
        let entries = &mut self.services[idx].1;
        if entries.is_empty() {
            self.services.remove(idx);
            return None;
        }

        let removed = entries.remove(0);
        if entries.is_empty() {
            self.services.remove(idx);
        }
        Some(removed)
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, service: &str) -> bool {
        self.get(service).is_some()
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    fn history_mut(&mut self, service: &str) -> &mut Vec<Entry> {
        let idx = match self.services.iter().position(|(name, _)| name == service) {
            Some(idx) => idx,
            None => {
                self.services.push((service.to_string(), Vec::new()));
                self.services.len() - 1
            }
        };
        &mut self.services[idx].1
    }
}
