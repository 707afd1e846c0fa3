use core_types::{AdvisorId, CoreError, SaleId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("Advisor not found: {0}")]
    AdvisorNotFound(AdvisorId),

    #[error("Sale {sale_id} not found for advisor {advisor_id}")]
    SaleNotFound { advisor_id: AdvisorId, sale_id: SaleId },

    #[error("No {0} ids left to issue")]
    IdsExhausted(&'static str),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::AdvisorNotFound(_) | LedgerError::SaleNotFound { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
