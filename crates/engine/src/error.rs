use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Export error: {0}")]
    Export(#[from] exporter::ExportError),
}

impl EngineError {
    /// True when the operation was refused because of invalid input.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Ledger(e) if e.is_validation())
    }

    /// True when the operation referenced an advisor or sale that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Ledger(e) if e.is_not_found())
    }
}
