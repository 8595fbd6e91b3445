//! Pluggable durability backends for Fast Memory: a narrow interface so the
//! in-memory store can be swapped for a durable one without touching
//! `FastMemory`'s query logic.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use intent_types::GoldenRecord;

use crate::error::MemoryError;

/// Append-only persistence for golden records. `append` must durably write
/// before returning successfully — the same append-only durability
/// contract the Review Queue's backend follows.
pub trait MemoryBackend: Send + Sync {
    fn append(&self, record: &GoldenRecord) -> Result<(), MemoryError>;
    fn load_all(&self) -> Result<Vec<GoldenRecord>, MemoryError>;
    /// Discard everything persisted so far: an embedder model change may
    /// invalidate the whole stream rather than just the runtime view of it.
    /// Default no-op for backends with nothing durable to clear.
    fn clear(&self) -> Result<(), MemoryError> {
        Ok(())
    }
}

/// No-op backend: records live only in the in-memory map. Used for tests
/// and ephemeral deployments.
#[derive(Debug, Default)]
pub struct NullBackend;

impl MemoryBackend for NullBackend {
    fn append(&self, _record: &GoldenRecord) -> Result<(), MemoryError> {
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<GoldenRecord>, MemoryError> {
        Ok(Vec::new())
    }
}

/// Append-only JSON-lines file, `fsync`'d before `append` returns. Replayed
/// in full on `load_all` to rebuild `FastMemory` at service start (spec
/// §6 "golden-record stream... replayed into Fast Memory at start").
pub struct JsonLinesBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoryBackend for JsonLinesBackend {
    fn append(&self, record: &GoldenRecord) -> Result<(), MemoryError> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let line = serde_json::to_string(record)
            .map_err(|e| MemoryError::PersistenceWrite(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MemoryError::PersistenceWrite(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| MemoryError::PersistenceWrite(e.to_string()))?;
        file.sync_data()
            .map_err(|e| MemoryError::PersistenceWrite(e.to_string()))?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<GoldenRecord>, MemoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = std::fs::File::open(&self.path)
            .map_err(|e| MemoryError::PersistenceRead(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| MemoryError::PersistenceRead(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: GoldenRecord = serde_json::from_str(&line)
                .map_err(|e| MemoryError::PersistenceRead(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    fn clear(&self) -> Result<(), MemoryError> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        std::fs::File::create(&self.path).map_err(|e| MemoryError::PersistenceWrite(e.to_string()))?;
        Ok(())
    }
}
