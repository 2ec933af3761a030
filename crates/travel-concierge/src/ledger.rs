//! Reservation Ledger
//!
//! Append-only durable store of reservation records: one JSON object per
//! line, keyed by write order. A record that reports success is on disk and
//! synced before the call returns; corrections are new records, never edits.
//! The ledger is the sole source of truth for trip summaries.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::model::ReservationRecord;

/// Faults of the durable ledger
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file IO failed
    #[error("Ledger IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded for writing
    #[error("Failed to encode record: {0}")]
    Encode(serde_json::Error),

    /// The ledger exists but its contents cannot be decoded. Distinct from
    /// an absent ledger, which reads as empty.
    #[error("Ledger malformed at line {line}: {detail}")]
    Malformed { line: usize, detail: String },

    /// The writer lock was poisoned by a panicking thread
    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

impl From<StorageError> for agent_core::ToolError {
    fn from(err: StorageError) -> Self {
        agent_core::ToolError::HandlerFailed(err.to_string())
    }
}

/// Append-only reservation ledger backed by a JSONL file.
///
/// Appends from concurrent sessions are serialized by a single-writer lock;
/// reads take the same lock, so a snapshot never observes a torn record.
pub struct TripLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TripLedger {
    /// Open a ledger at the given path. The file is created lazily on the
    /// first append; a never-written ledger reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one record.
    ///
    /// Atomic with respect to the record: the whole line is written and
    /// synced under the writer lock before Ok is returned, so `read_all`
    /// sees either none of it or all of it.
    pub fn append(&self, record: &ReservationRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(record).map_err(StorageError::Encode)?;
        line.push(b'\n');

        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        file.sync_all()?;

        tracing::debug!(path = %self.path.display(), "Reservation appended to ledger");
        Ok(())
    }

    /// Read every record in append order.
    ///
    /// An absent ledger is an empty trip, not an error. Unknown
    /// `reservation_type` tags are skipped (forward compatibility); anything
    /// else that fails to decode is `StorageError::Malformed`.
    pub fn read_all(&self) -> Result<Vec<ReservationRecord>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(raw).map_err(|err| StorageError::Malformed {
                    line,
                    detail: err.to_string(),
                })?;

            let Some(tag) = value.get("reservation_type").and_then(|t| t.as_str()) else {
                return Err(StorageError::Malformed {
                    line,
                    detail: "missing reservation_type discriminant".into(),
                });
            };

            if !ReservationRecord::is_known_tag(tag) {
                tracing::debug!(tag, line, "Skipping unknown reservation type");
                continue;
            }

            let record =
                serde_json::from_value(value).map_err(|err| StorageError::Malformed {
                    line,
                    detail: err.to_string(),
                })?;
            records.push(record);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TripType;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn flight(departure: &str, destination: &str, cost: u32) -> ReservationRecord {
        ReservationRecord::TripReservation {
            trip_type: TripType::Flight,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            departure: departure.into(),
            destination: destination.into(),
            cost,
        }
    }

    #[test]
    fn test_append_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = TripLedger::new(dir.path().join("trip.jsonl"));

        ledger.append(&flight("La Paz", "Santa Cruz", 300)).unwrap();
        ledger.append(&flight("Santa Cruz", "Sucre", 250)).unwrap();

        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], flight("La Paz", "Santa Cruz", 300));
        assert_eq!(records[1], flight("Santa Cruz", "Sucre", 250));
    }

    #[test]
    fn test_absent_ledger_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = TripLedger::new(dir.path().join("never-written.jsonl"));
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_is_an_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.jsonl");
        std::fs::write(&path, "{not json\n").unwrap();

        let ledger = TripLedger::new(&path);
        assert!(matches!(
            ledger.read_all(),
            Err(StorageError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_tag_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.jsonl");
        let ledger = TripLedger::new(&path);

        ledger.append(&flight("La Paz", "Uyuni", 400)).unwrap();
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{\"reservation_type\":\"CruiseReservation\",\"cost\":9000}\n");
        std::fs::write(&path, content).unwrap();

        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_concurrent_appends_stay_intact() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(TripLedger::new(dir.path().join("trip.jsonl")));

        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for i in 0..5u32 {
                        ledger
                            .append(&flight("La Paz", "Santa Cruz", t * 100 + i))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every record decodes cleanly: no interleaving, none lost.
        let records = ledger.read_all().unwrap();
        assert_eq!(records.len(), 40);
    }
}
