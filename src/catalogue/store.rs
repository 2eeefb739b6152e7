use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalogue::catalogue::Catalogue;
use crate::document::DocumentRecord;

/// File name of the snapshot inside a `FileStore` root.
pub const SNAPSHOT_FILE: &str = "scripts.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single-value key/value slot holding the serialized catalogue.
///
/// Whole-value replace only. One writer is assumed.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Snapshot held in memory. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.value = Some(bytes.to_vec());
        Ok(())
    }
}

/// Snapshot kept in `<root>/scripts.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write aside, then rename over the old snapshot
        let temp = self.path.with_extension("json.tmp");
        let written = write_and_rename(&temp, &self.path, bytes);
        if written.is_err() {
            let _ = fs::remove_file(&temp);
        }
        Ok(written?)
    }
}

fn write_and_rename(temp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(temp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    fs::rename(temp, target)
}

/// What a store held at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotState {
    Absent,
    Loaded(Vec<DocumentRecord>),
    /// Present but unreadable or corrupt; its contents were dropped.
    Discarded,
}

impl SnapshotState {
    pub fn into_records(self) -> Vec<DocumentRecord> {
        match self {
            SnapshotState::Loaded(records) => records,
            SnapshotState::Absent | SnapshotState::Discarded => Vec::new(),
        }
    }
}

pub fn encode_snapshot(catalogue: &Catalogue) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(catalogue)?)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<DocumentRecord>, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Records from the last saved snapshot.
///
/// An absent, unreadable or corrupt snapshot contributes nothing; the
/// condition is logged and never reaches the caller.
pub fn load_snapshot<S: SnapshotStore>(store: &S) -> Vec<DocumentRecord> {
    read_snapshot(store).into_records()
}

/// Like `load_snapshot`, but tells an absent snapshot from a discarded one.
pub fn read_snapshot<S: SnapshotStore>(store: &S) -> SnapshotState {
    let bytes = match store.load() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return SnapshotState::Absent,
        Err(e) => {
            warn!(error = %e, "could not read catalogue snapshot");
            return SnapshotState::Discarded;
        }
    };

    match decode_snapshot(&bytes) {
        Ok(records) => {
            debug!(records = records.len(), "catalogue snapshot loaded");
            SnapshotState::Loaded(records)
        }
        Err(e) => {
            warn!(error = %e, "discarding corrupt catalogue snapshot");
            SnapshotState::Discarded
        }
    }
}

/// Overwrite the stored snapshot with the whole catalogue.
pub fn save_snapshot<S: SnapshotStore>(store: &mut S, catalogue: &Catalogue) -> Result<(), StoreError> {
    let bytes = encode_snapshot(catalogue)?;
    store.save(&bytes)?;
    debug!(records = catalogue.len(), "catalogue snapshot saved");
    Ok(())
}
