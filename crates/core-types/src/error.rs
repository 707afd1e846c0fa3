use crate::enums::Field;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(Field, String),
}

impl CoreError {
    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            CoreError::InvalidInput(field, _) => *field,
        }
    }
}
