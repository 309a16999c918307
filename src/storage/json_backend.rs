use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, ensure_dir, record_file_in, write_atomic},
    errors::Result,
    ledger::Ledger,
};

use super::{decode_record, encode_record, LedgerStore, DEFAULT_STORAGE_KEY};

/// Stores the ledger as one pretty-printed JSON file, written atomically.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, key: Option<&str>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let path = record_file_in(&root, key.unwrap_or(DEFAULT_STORAGE_KEY));
        Ok(Self { root, path })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonStorage {
    fn load(&self) -> Result<Option<Ledger>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        decode_record(&data)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = encode_record(ledger)?;
        write_atomic(&self.path, &json)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
