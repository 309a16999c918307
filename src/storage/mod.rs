//! Persistence collaborators for the single ledger record.

pub mod json_backend;
pub mod memory;

use crate::{
    errors::Result,
    ledger::{Ledger, CURRENT_SCHEMA_VERSION},
};

/// Fixed, versioned key under which the ledger record is stored.
pub const DEFAULT_STORAGE_KEY: &str = "qada_state_v1";

/// Abstraction over backends able to hold one serialized ledger.
///
/// Implementations report failures honestly; the fail-soft policy (absent on
/// read failure, log-and-continue on write failure) is applied by
/// [`crate::core::ledger_manager::LedgerManager`].
pub trait LedgerStore: Send + Sync {
    /// Returns the stored ledger, or `None` when nothing usable is stored.
    fn load(&self) -> Result<Option<Ledger>>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub fn encode_record(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string_pretty(ledger)?)
}

/// Decodes a stored record. Records whose schema version is missing or
/// differs from [`CURRENT_SCHEMA_VERSION`] are treated as absent.
pub fn decode_record(data: &str) -> Result<Option<Ledger>> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    let version = value.get("schema_version").and_then(|v| v.as_u64());
    if version != Some(u64::from(CURRENT_SCHEMA_VERSION)) {
        tracing::warn!(
            ?version,
            supported = CURRENT_SCHEMA_VERSION,
            "ignoring ledger record with unsupported schema version"
        );
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
