// src/storage/json_store.rs

use crate::domain::snapshot::Snapshot;
use crate::errors::TrackerError;
use crate::storage::Storage;
use chrono::Utc;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Directory of per-state snapshot files, one pretty-printed JSON document
/// each. The file layout is the storage contract; older files must keep
/// loading.
#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self, state: &str) -> PathBuf {
        self.dir
            .join(format!("snapshot_{}.json", state.trim().to_lowercase()))
    }
}

impl Storage for JsonStore {
    fn load(&self, state: &str) -> Result<Snapshot, TrackerError> {
        let path = self.snapshot_path(state);
        if !path.exists() {
            return Ok(Snapshot::empty(Utc::now().to_rfc3339()));
        }
        read_snapshot(&path)
    }

    fn save(&self, snapshot: &Snapshot, state: &str) -> Result<(), TrackerError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            TrackerError::Storage(format!("Failed to create {}: {e}", self.dir.display()))
        })?;
        let path = self.snapshot_path(state);
        let file = File::create(&path)
            .map_err(|e| TrackerError::Storage(format!("Failed to create {}: {e}", path.display())))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, snapshot)
            .map_err(|e| TrackerError::Storage(format!("Failed to write {}: {e}", path.display())))
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot, TrackerError> {
    let data = fs::read_to_string(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| TrackerError::Storage(format!("Corrupt snapshot {}: {e}", path.display())))
}
