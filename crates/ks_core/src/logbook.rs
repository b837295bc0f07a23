//! Match Log Sink
//!
//! Append-only, sequenced commentary of everything that happens in a game.
//! The presentation layer reads it; the engine only ever appends. Entries
//! carry the engine tick they were emitted on, so a replay of the same seed
//! lines up entry for entry.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub seq: u32,
    pub tick: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn push(&mut self, tick: u64, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "ks_core::log", tick, "{}", message);
        self.entries.push(LogEntry { seq: self.entries.len() as u32, tick, message });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Drop everything; used when a new game begins.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True if any entry contains `needle`. Convenience for assertions and
    /// simple front-end filters.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}
