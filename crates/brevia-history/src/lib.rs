//! Brevia History — bounded, most-recent-first record of past summarizations.
//!
//! A fixed-capacity ordered sequence with eviction-on-insert, persisted
//! whole to a single JSON file. Corrupt or missing state reads as empty,
//! never as a fatal error. Single-writer; concurrent cross-instance access
//! to the same file is out of scope.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use brevia_core::Result;
use brevia_summarize::{SummaryLength, SummaryStyle};

/// Capacity of the history sequence; insertion evicts the oldest beyond this.
pub const MAX_HISTORY: usize = 10;

/// One recorded summarization. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    #[serde(rename = "inputText")]
    pub input_text: String,
    pub summary: String,
    pub style: SummaryStyle,
    pub length: SummaryLength,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
}

/// A completed summarization about to be recorded; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewHistoryItem {
    pub input_text: String,
    pub summary: String,
    pub style: SummaryStyle,
    pub length: SummaryLength,
    pub word_count: usize,
}

/// File-backed history store over one JSON slot.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Record a completed summarization: assign id and timestamp, prepend,
    /// evict beyond capacity, persist the full sequence.
    pub fn record(&self, entry: NewHistoryItem) -> Result<HistoryItem> {
        let item = HistoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            input_text: entry.input_text,
            summary: entry.summary,
            style: entry.style,
            length: entry.length,
            timestamp: chrono::Utc::now().timestamp_millis(),
            word_count: entry.word_count,
        };

        let mut items = self.list();
        items.insert(0, item.clone());
        items.truncate(MAX_HISTORY);
        self.persist(&items)?;

        Ok(item)
    }

    /// The persisted sequence, most-recent-first. Missing or unparseable
    /// state is treated as empty.
    pub fn list(&self) -> Vec<HistoryItem> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Discarding unreadable history state: {}", e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Remove the item with the given id if present; absent ids are a no-op.
    /// Returns the updated sequence.
    pub fn delete(&self, id: &str) -> Result<Vec<HistoryItem>> {
        let mut items = self.list();
        items.retain(|item| item.id != id);
        self.persist(&items)?;
        Ok(items)
    }

    /// Remove all persisted state.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the complete sequence; there is no partial-update path.
    fn persist(&self, items: &[HistoryItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        (dir, store)
    }

    fn entry(summary: &str) -> NewHistoryItem {
        NewHistoryItem {
            input_text: "Some document text that was summarized.".into(),
            summary: summary.into(),
            style: SummaryStyle::Bullet,
            length: SummaryLength::Short,
            word_count: 6,
        }
    }

    #[test]
    fn test_record_prepends() {
        let (_dir, store) = store();
        store.record(entry("first")).unwrap();
        store.record(entry("second")).unwrap();

        let items = store.list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].summary, "second");
        assert_eq!(items[1].summary, "first");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let (_dir, store) = store();
        for i in 0..11 {
            store.record(entry(&format!("summary {}", i))).unwrap();
        }

        let items = store.list();
        assert_eq!(items.len(), MAX_HISTORY);
        assert_eq!(items[0].summary, "summary 10");
        assert_eq!(items[9].summary, "summary 1");
        assert!(!items.iter().any(|i| i.summary == "summary 0"));
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let (_dir, store) = store();
        store.record(entry("kept")).unwrap();

        let items = store.delete("no-such-id").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary, "kept");
    }

    #[test]
    fn test_delete_removes_item() {
        let (_dir, store) = store();
        let first = store.record(entry("first")).unwrap();
        store.record(entry("second")).unwrap();

        let items = store.delete(&first.id).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary, "second");
        // And the deletion persisted
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_corrupt_state_reads_as_empty() {
        let (_dir, store) = store();
        store.record(entry("about to be lost")).unwrap();
        std::fs::write(store.path.clone(), "{not json").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_clear_removes_state() {
        let (_dir, store) = store();
        store.record(entry("gone")).unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_items_get_unique_ids_and_timestamps() {
        let (_dir, store) = store();
        let a = store.record(entry("a")).unwrap();
        let b = store.record(entry("b")).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
    }
}
