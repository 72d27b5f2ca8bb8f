//! Snapshot persistence: a latest-overwrite slot plus an append-only history.
//!
//! The two destinations are independent writes of the same snapshot with
//! different retention; neither read-modify-writes the other. The store is
//! injected into the runner so tests can substitute `MemoryStore`.

use crate::data_structs::Snapshot;
use crate::error::*;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// A destination for scraped snapshots.
pub trait WaitTimeStore {
    /// Overwrite the single "latest" snapshot.
    fn upsert_latest(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Append the snapshot to the historical log.
    fn append_history(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// An in-memory store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub latest: Option<Snapshot>,
    pub history: Vec<Snapshot>
}

impl MemoryStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WaitTimeStore for MemoryStore {
    fn upsert_latest(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.latest = Some(snapshot.clone());
        Ok(())
    }

    fn append_history(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.history.push(snapshot.clone());
        Ok(())
    }
}

/// A file-backed store: `latest` is a JSON file that gets truncated on every
/// write, `history` is a JSON-lines file that only ever grows.
pub struct JsonFileStore {
    latest_path: PathBuf,
    history_path: PathBuf
}

impl JsonFileStore {
    #[inline]
    pub fn new<L, H>(latest_path: L, history_path: H) -> Self
        where L: Into<PathBuf>,
              H: Into<PathBuf> {

        Self {
            latest_path: latest_path.into(),
            history_path: history_path.into()
        }
    }
}

impl WaitTimeStore for JsonFileStore {
    fn upsert_latest(&mut self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)
            .chain_err(|| ErrorKind::Storage("latest".into()))?;

        let mut file = File::create(&self.latest_path)
            .chain_err(|| ErrorKind::Storage("latest".into()))?;
        file.write_all(json.as_bytes())
            .chain_err(|| ErrorKind::Storage("latest".into()))?;

        Ok(())
    }

    fn append_history(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut json = serde_json::to_string(snapshot)
            .chain_err(|| ErrorKind::Storage("history".into()))?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)
            .chain_err(|| ErrorKind::Storage("history".into()))?;
        file.write_all(json.as_bytes())
            .chain_err(|| ErrorKind::Storage("history".into()))?;

        Ok(())
    }
}
