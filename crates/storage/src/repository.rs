use crate::blob::BlobStore;
use crate::error::StorageError;
use core_types::LedgerSnapshot;
use core_types::validation::validate_snapshot;

/// The fixed application key the ledger is stored under.
pub const DEFAULT_KEY: &str = "gestorComisiones";

/// The `Repository` loads and saves the whole ledger state through a `BlobStore`.
/// It encapsulates the document format and the application key.
#[derive(Debug, Clone)]
pub struct Repository<B> {
    store: B,
    key: String,
}

impl<B: BlobStore> Repository<B> {
    /// Creates a repository using the default application key.
    pub fn new(store: B) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    pub fn with_key(store: B, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut B {
        &mut self.store
    }

    /// Reads the persisted state. A store that has never been written to yields
    /// an empty snapshot (`advisors = []`, `next_id = 1`).
    ///
    /// Rates and amounts are checked against the ledger's input rules; a
    /// document failing them is refused rather than loaded.
    pub fn load(&self) -> Result<LedgerSnapshot, StorageError> {
        match self.store.get(&self.key)? {
            Some(blob) => {
                let snapshot: LedgerSnapshot = serde_json::from_str(&blob)?;
                validate_snapshot(&snapshot).map_err(|source| StorageError::InvalidDocument {
                    key: self.key.clone(),
                    source,
                })?;
                tracing::debug!(
                    key = %self.key,
                    advisors = snapshot.advisors.len(),
                    "Loaded ledger snapshot."
                );
                Ok(snapshot)
            }
            None => {
                tracing::debug!(key = %self.key, "No saved ledger found, starting empty.");
                Ok(LedgerSnapshot::default())
            }
        }
    }

    /// Replaces the persisted state with `snapshot`.
    pub fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StorageError> {
        let blob = serde_json::to_string(snapshot)?;
        self.store.set(&self.key, &blob)?;
        tracing::debug!(key = %self.key, bytes = blob.len(), "Saved ledger snapshot.");
        Ok(())
    }
}
