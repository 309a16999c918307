use std::sync::Mutex;

use crate::{
    errors::{QadaError, Result},
    ledger::Ledger,
};

use super::{decode_record, encode_record, LedgerStore};

/// Keeps the serialized record in memory. Useful for embedding hosts that
/// persist elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw record, as if previously written.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw record currently held, if any.
    pub fn raw(&self) -> Option<String> {
        self.record.lock().ok().and_then(|guard| guard.clone())
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.record
            .lock()
            .map_err(|_| QadaError::Storage("memory store lock poisoned".into()))
    }
}

impl LedgerStore for MemoryStorage {
    fn load(&self) -> Result<Option<Ledger>> {
        match self.slot()?.as_deref() {
            Some(raw) => decode_record(raw),
            None => Ok(None),
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = encode_record(ledger)?;
        *self.slot()? = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_record_with_foreign_version_is_absent() {
        let storage = MemoryStorage::with_raw(r#"{"schema_version": 2}"#);
        assert!(storage.load().expect("load").is_none());
        assert!(storage.raw().is_some());
    }

    #[test]
    fn clear_forgets_the_record() {
        let storage = MemoryStorage::with_raw("{}");
        storage.clear().expect("clear");
        assert_eq!(storage.raw(), None);
        assert!(storage.load().expect("load").is_none());
    }
}
