//! Hash-chained consent log
//!
//! Each record stores the hash of its predecessor and a SHA-256 over its own
//! fields plus that predecessor hash. Editing, removing or reordering any
//! line breaks the chain from that point on.

use crate::jsonl;
use callmate_core::{ConsentRecord, Error, Result};
use chrono::Utc;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Append-only, tamper-evident consent log
pub struct ConsentLog {
    path: PathBuf,
    chain_hash: Mutex<Option<String>>,
}

impl ConsentLog {
    /// Open the log at `path`, continuing the chain from its last record.
    ///
    /// Fails if an existing line cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        jsonl::ensure_parent(&path)?;

        let records = read_records(&path)?;
        if !chain_is_valid(&records) {
            warn!(path = %path.display(), "existing consent log fails verification");
        }
        let chain_hash = records.last().and_then(|record| record.hash.clone());
        info!(path = %path.display(), records = records.len(), "consent log opened");

        Ok(Self {
            path,
            chain_hash: Mutex::new(chain_hash),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a consent decision and return the chained record
    pub fn record(&self, conversation_id: &str, consent: bool) -> Result<ConsentRecord> {
        let mut chain_hash = self.chain_hash.lock();

        let mut record = ConsentRecord {
            id: format!("cns_{}", uuid::Uuid::new_v4()),
            conversation_id: conversation_id.to_string(),
            consent,
            timestamp: Utc::now(),
            previous_hash: chain_hash.clone(),
            hash: None,
        };
        let hash = compute_hash(&record);
        record.hash = Some(hash.clone());

        jsonl::append(&self.path, &record)?;
        *chain_hash = Some(hash);

        debug!(conversation_id, consent, "consent recorded");
        Ok(record)
    }

    /// All records, oldest first
    pub fn records(&self) -> Result<Vec<ConsentRecord>> {
        let _guard = self.chain_hash.lock();
        read_records(&self.path)
    }

    /// Recompute the chain. Unparseable lines count as tampering.
    pub fn verify(&self) -> Result<bool> {
        match self.records() {
            Ok(records) => Ok(chain_is_valid(&records)),
            Err(Error::Serialization(e)) => {
                warn!(error = %e, "consent log contains a malformed line");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<ConsentRecord>> {
    jsonl::read_lines(path)?
        .iter()
        .map(|line| serde_json::from_str(line).map_err(Error::from))
        .collect()
}

fn chain_is_valid(records: &[ConsentRecord]) -> bool {
    let mut previous: Option<&String> = None;

    for record in records {
        if record.previous_hash.as_ref() != previous {
            return false;
        }
        if record.hash.as_deref() != Some(compute_hash(record).as_str()) {
            return false;
        }
        previous = record.hash.as_ref();
    }

    true
}

/// SHA-256 over the record fields, excluding `hash` itself
fn compute_hash(record: &ConsentRecord) -> String {
    let mut hasher = Sha256::new();

    hasher.update(record.id.as_bytes());
    hasher.update(record.conversation_id.as_bytes());
    hasher.update([u8::from(record.consent)]);
    hasher.update(record.timestamp.to_rfc3339().as_bytes());
    if let Some(ref previous) = record.previous_hash {
        hasher.update(previous.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("consent.jsonl")
    }

    #[test]
    fn test_chain_links_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConsentLog::open(log_path(&dir)).unwrap();

        let first = log.record("call-1", true).unwrap();
        let second = log.record("call-2", false).unwrap();

        assert!(first.previous_hash.is_none());
        assert_eq!(second.previous_hash, first.hash);
        assert!(log.verify().unwrap());
        assert_eq!(log.records().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_log_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConsentLog::open(log_path(&dir)).unwrap();
        assert!(log.verify().unwrap());
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_continues_chain() {
        let dir = tempfile::tempdir().unwrap();
        let first = ConsentLog::open(log_path(&dir))
            .unwrap()
            .record("call-1", true)
            .unwrap();

        let log = ConsentLog::open(log_path(&dir)).unwrap();
        let second = log.record("call-1", false).unwrap();

        assert_eq!(second.previous_hash, first.hash);
        assert!(log.verify().unwrap());
    }

    #[test]
    fn test_tampered_line_detected() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConsentLog::open(log_path(&dir)).unwrap();
        log.record("call-1", true).unwrap();
        log.record("call-2", true).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let tampered = content.replacen("\"consent\":true", "\"consent\":false", 1);
        std::fs::write(log.path(), tampered).unwrap();

        assert!(!log.verify().unwrap());
    }

    #[test]
    fn test_removed_line_detected() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConsentLog::open(log_path(&dir)).unwrap();
        for id in ["a", "b", "c"] {
            log.record(id, true).unwrap();
        }

        let content = std::fs::read_to_string(log.path()).unwrap();
        let kept: Vec<&str> = content.lines().enumerate().filter(|(i, _)| *i != 1).map(|(_, l)| l).collect();
        std::fs::write(log.path(), kept.join("\n")).unwrap();

        assert!(!log.verify().unwrap());
    }

    #[test]
    fn test_malformed_line_fails_verification() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConsentLog::open(log_path(&dir)).unwrap();
        log.record("call-1", true).unwrap();
        std::fs::write(log.path(), "garbage\n").unwrap();

        assert!(!log.verify().unwrap());
    }
}
