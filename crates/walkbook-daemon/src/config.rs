use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use walkbook_storage::{Bookings, InMemoryOrderStore, OrderStore};
use walkbook_storage_sqlite::SqliteOrderStore;

use crate::http::SharedBookings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub listen: String,
    /// SQLite file. `~` is expanded.
    pub db_path: String,
    pub storage: StorageKind,
    /// Log filter (env-filter syntax).
    pub log: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8000".to_string(),
            db_path: "walkbook.db".to_string(),
            storage: StorageKind::Sqlite,
            log: "info".to_string(),
        }
    }
}

/// Command-line values that win over the config file when set.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub listen: Option<String>,
    pub db_path: Option<String>,
    pub storage: Option<StorageKind>,
    pub log: Option<String>,
}

impl DaemonConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: DaemonConfig =
            toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self).context("serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut cfg = match file {
            Some(p) => Self::load_from(p)?,
            None => Self::default(),
        };
        if let Some(v) = overrides.listen {
            cfg.listen = v;
        }
        if let Some(v) = overrides.db_path {
            cfg.db_path = v;
        }
        if let Some(v) = overrides.storage {
            cfg.storage = v;
        }
        if let Some(v) = overrides.log {
            cfg.log = v;
        }
        Ok(cfg)
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.db_path).into_owned())
    }

    pub fn open_bookings(&self) -> Result<SharedBookings> {
        let store: Box<dyn OrderStore> = match self.storage {
            StorageKind::Sqlite => Box::new(SqliteOrderStore::open(&self.db_path())?),
            StorageKind::Memory => Box::new(InMemoryOrderStore::new()),
        };
        Ok(Arc::new(Bookings::new(store)))
    }
}
