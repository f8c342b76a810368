//! Storage layer
//!
//! `LedgerStore` is the in-memory owner of the record collection. `LedgerFile`
//! is the on-disk snapshot the command-line front end loads before running a
//! command and writes back afterwards.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, write_json_atomic};
pub use ledger::LedgerStore;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryCatalog, TransactionRecord};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Serializable ledger snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Records in insertion order
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,

    #[serde(default)]
    pub custom_categories: CategoryCatalog,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            transactions: Vec::new(),
            custom_categories: CategoryCatalog::default(),
        }
    }
}

impl LedgerFile {
    /// Load a snapshot, or an empty one if the file doesn't exist
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let file: LedgerFile = read_json(path)?;
        if file.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "{} uses schema version {}, newer than supported version {}",
                path.display(),
                file.schema_version,
                SNAPSHOT_SCHEMA_VERSION
            )));
        }
        debug!(path = %path.display(), count = file.transactions.len(), "loaded ledger snapshot");
        Ok(file)
    }

    /// Build the in-memory store from this snapshot
    pub fn into_parts(self) -> LedgerResult<(LedgerStore, CategoryCatalog)> {
        Ok((
            LedgerStore::from_records(self.transactions)?,
            self.custom_categories,
        ))
    }

    /// Capture the current state of a store
    pub fn capture(store: &LedgerStore, categories: &CategoryCatalog) -> LedgerResult<Self> {
        Ok(Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            transactions: store.records()?,
            custom_categories: categories.clone(),
        })
    }

    /// Write the snapshot atomically
    pub fn save(&self, path: &Path) -> LedgerResult<()> {
        write_json_atomic(path, self)?;
        debug!(path = %path.display(), count = self.transactions.len(), "saved ledger snapshot");
        Ok(())
    }
}
