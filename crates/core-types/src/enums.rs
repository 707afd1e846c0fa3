use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the user-supplied field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    AdvisorName,
    CommissionRate,
    SaleName,
    Amount,
    Date,
}

impl Field {
    /// Returns the human-readable label of the field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::AdvisorName => "advisor name",
            Field::CommissionRate => "commission rate",
            Field::SaleName => "sale name",
            Field::Amount => "amount",
            Field::Date => "date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
