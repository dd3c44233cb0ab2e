//! Storage backends: one opaque JSON blob per store name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde_json::Value;

/// Host storage facility for durable store records.
///
/// Implementations must tolerate concurrent handles (stores each hold an
/// `Arc<dyn StateStorage>`), but a given record is only ever written by the
/// single store that owns its name.
pub trait StateStorage: Send + Sync {
    /// Read the durable record for `store`, if one exists.
    fn read(&self, store: &str) -> anyhow::Result<Option<Value>>;

    /// Write (create or replace) the durable record for `store`.
    fn write(&self, store: &str, blob: &Value) -> anyhow::Result<()>;

    /// Remove the durable record for `store`. Removing a missing record is
    /// not an error.
    fn remove(&self, store: &str) -> anyhow::Result<()>;
}

/// File-backed storage: `<dir>/<store>.json` per record.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Storage rooted at an explicit directory (created if missing).
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create storage directory at {dir:?}"))?;
        Ok(Self { dir })
    }

    /// Storage rooted at the OS app-data directory: `{app_data_dir}/artglass`.
    pub fn in_app_data() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory")?;
        Self::new(base.join("artglass"))
    }

    fn record_path(&self, store: &str) -> PathBuf {
        self.dir.join(format!("{store}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateStorage for JsonFileStorage {
    fn read(&self, store: &str) -> anyhow::Result<Option<Value>> {
        let path = self.record_path(store);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read durable record at {path:?}"))
            }
        };
        let blob = serde_json::from_str(&data)
            .with_context(|| format!("invalid durable record at {path:?}"))?;
        Ok(Some(blob))
    }

    fn write(&self, store: &str, blob: &Value) -> anyhow::Result<()> {
        let path = self.record_path(store);
        let payload =
            serde_json::to_string_pretty(blob).context("failed to serialize durable record")?;
        // Write-then-rename so a crash mid-write never truncates the record.
        let tmp = self.dir.join(format!("{store}.json.tmp"));
        std::fs::write(&tmp, payload)
            .with_context(|| format!("failed to write durable record at {tmp:?}"))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to commit durable record at {path:?}"))?;
        Ok(())
    }

    fn remove(&self, store: &str) -> anyhow::Result<()> {
        let path = self.record_path(store);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove durable record at {path:?}"))
            }
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing any store (test setup helper).
    pub fn seed(&self, store: &str, blob: Value) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(store.to_owned(), blob);
        }
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self, store: &str) -> anyhow::Result<Option<Value>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?;
        Ok(records.get(store).cloned())
    }

    fn write(&self, store: &str, blob: &Value) -> anyhow::Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?;
        records.insert(store.to_owned(), blob.clone());
        Ok(())
    }

    fn remove(&self, store: &str) -> anyhow::Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?;
        records.remove(store);
        Ok(())
    }
}
