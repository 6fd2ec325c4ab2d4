//! Feedback persistence
//!
//! One JSON object per line, appended in arrival order. Lines that fail to
//! parse are skipped with a warning rather than failing the whole read.

use crate::jsonl;
use callmate_core::{FeedbackRecord, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Helpful / not-helpful totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackCounts {
    pub helpful: u64,
    pub not_helpful: u64,
}

/// Append-only feedback store backed by a JSON-lines file
pub struct FeedbackStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        jsonl::ensure_parent(&path)?;
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record feedback for a shown suggestion
    pub fn record(
        &self,
        conversation_id: &str,
        text: &str,
        helpful: bool,
    ) -> Result<FeedbackRecord> {
        let record = FeedbackRecord {
            id: format!("fb_{}", uuid::Uuid::new_v4()),
            conversation_id: conversation_id.to_string(),
            text: text.to_string(),
            helpful,
            timestamp: Utc::now(),
        };

        let _guard = self.lock.lock();
        jsonl::append(&self.path, &record)?;
        debug!(conversation_id, helpful, "feedback recorded");
        Ok(record)
    }

    /// Every stored record, oldest first
    pub fn history(&self) -> Result<Vec<FeedbackRecord>> {
        let lines = {
            let _guard = self.lock.lock();
            jsonl::read_lines(&self.path)?
        };

        let mut records = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            match serde_json::from_str::<FeedbackRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed feedback line"),
            }
        }
        Ok(records)
    }

    pub fn counts(&self) -> Result<FeedbackCounts> {
        let mut counts = FeedbackCounts::default();
        for record in self.history()? {
            if record.helpful {
                counts.helpful += 1;
            } else {
                counts.not_helpful += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store(dir: &tempfile::TempDir) -> FeedbackStore {
        FeedbackStore::open(dir.path().join("feedback.jsonl")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(store.history().unwrap().is_empty());
        assert_eq!(store.counts().unwrap(), FeedbackCounts::default());
    }

    #[test]
    fn test_record_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.record("call-1", "Apologize for the delay", true).unwrap();
        store.record("call-1", "Offer help", false).unwrap();
        store.record("call-2", "Offer help", true).unwrap();

        assert_eq!(
            store.counts().unwrap(),
            FeedbackCounts {
                helpful: 2,
                not_helpful: 1
            }
        );

        let history = store.history().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "Apologize for the delay");
        assert_eq!(history[2].conversation_id, "call-2");
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir).record("call-1", "first", true).unwrap();

        let reopened = store(&dir);
        reopened.record("call-1", "second", true).unwrap();
        let texts: Vec<_> = reopened.history().unwrap().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.record("call-1", "ok", true).unwrap();

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(store.path())
            .unwrap();
        writeln!(file, "{{not json").unwrap();
        drop(file);

        store.record("call-1", "also ok", false).unwrap();
        assert_eq!(store.history().unwrap().len(), 2);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::open(dir.path().join("nested/data/feedback.jsonl")).unwrap();
        store.record("call-1", "x", true).unwrap();
        assert!(store.path().exists());
    }
}
