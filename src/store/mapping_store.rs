use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AutofillError, Result};
use crate::field::field_model::Category;
use crate::fill::mapping::MappingTable;

/// Persistence for the user's mapping table.
pub trait MappingStore {
    /// Stored table, or the built-in defaults when nothing was saved yet.
    fn load(&self) -> Result<MappingTable>;

    fn save(&self, table: &MappingTable) -> Result<()>;
}

/// Mapping table kept as a pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store_error(&self, source: std::io::Error) -> AutofillError {
        AutofillError::Store {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl MappingStore for JsonFileStore {
    fn load(&self) -> Result<MappingTable> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored mappings, using defaults");
                return Ok(MappingTable::defaults());
            }
            Err(e) => return Err(self.store_error(e)),
        };

        let stored: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| AutofillError::JsonParse {
                context: format!("mappings {}", self.path.display()),
                source: e,
            })?;

        // A hand-edited file with a stray key still loads
        let mut table = MappingTable::empty();
        for (key, value) in stored {
            match key.parse::<Category>() {
                Ok(category) => table.set(category, value),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "skipping stored mapping")
                }
            }
        }
        tracing::debug!(path = %self.path.display(), entries = table.len(), "loaded mappings");
        Ok(table)
    }

    fn save(&self, table: &MappingTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.store_error(e))?;
        }

        let json = serde_json::to_string_pretty(table).map_err(|e| AutofillError::JsonSerialize {
            context: "mappings".into(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.store_error(e))?;

        tracing::info!(path = %self.path.display(), entries = table.len(), "saved mappings");
        Ok(())
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RefCell<Option<MappingTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: MappingTable) -> Self {
        Self {
            table: RefCell::new(Some(table)),
        }
    }
}

impl MappingStore for MemoryStore {
    fn load(&self) -> Result<MappingTable> {
        Ok(self
            .table
            .borrow()
            .clone()
            .unwrap_or_else(MappingTable::defaults))
    }

    fn save(&self, table: &MappingTable) -> Result<()> {
        *self.table.borrow_mut() = Some(table.clone());
        Ok(())
    }
}

/// Replace the stored mapping with user-entered pairs.
///
/// Blank pairs are dropped, an unknown category aborts the update before
/// anything is written. Returns the table that was saved.
pub fn update_mapping<I, K, V>(store: &dyn MappingStore, entries: I) -> Result<MappingTable>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let table = MappingTable::from_entries(entries)?;
    store.save(&table)?;
    Ok(table)
}
