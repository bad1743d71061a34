use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use crate::{
    core::store::{EntryStore, StoreResult},
    persist::sqlite::SqliteEntryTable,
};

/// Settings for opening the store and sizing the runtime channels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Database file; `None` keeps the table in memory.
    pub db_path: Option<PathBuf>,
    /// Pending commands before callers wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber before the oldest are dropped.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            command_queue_bound: 64,
            event_capacity: 256,
        }
    }
}

impl RuntimeConfig {
    /// Parses a JSON object; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Opens the SQLite-backed store described by `config`.
pub fn open_store(config: &RuntimeConfig) -> StoreResult<EntryStore> {
    let table = match &config.db_path {
        Some(path) => SqliteEntryTable::open(path)?,
        None => {
            info!("entry table opened in memory");
            SqliteEntryTable::open_in_memory()?
        }
    };
    Ok(EntryStore::new(Box::new(table)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RuntimeConfig::from_json(r#"{"db_path": "/tmp/mood.db"}"#).unwrap();
        assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/mood.db")));
        assert_eq!(cfg.command_queue_bound, 64);
        assert_eq!(RuntimeConfig::from_json("{}").unwrap(), RuntimeConfig::default());
    }
}
