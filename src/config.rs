//! Connection bootstrap for callers that do not manage their own connection.
//!
//! The store never reads this: it only ever sees the opened
//! [`rusqlite::Connection`].

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::store::ParcelStore;

const DEFAULT_DB_PATH: &str = "tracker.db";

/// Where the tracker database lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl TrackerConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open (creating if needed) the database file and apply the parcel schema.
    pub fn open(&self) -> Result<Connection> {
        let path = self.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        ParcelStore::new(&conn).init_schema()?;
        info!(path = %path.display(), "tracker database opened");
        Ok(conn)
    }

    /// Private in-memory database with the parcel schema applied.
    pub fn open_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()?;
        ParcelStore::new(&conn).init_schema()?;
        Ok(conn)
    }
}
