use thiserror::Error;

use crate::types::{FiscalYear, StatementKind};

#[derive(Debug, Error)]
pub enum FinStatError {
    #[error("No {statement} record for fiscal year {year}")]
    NotFound {
        statement: StatementKind,
        year: FiscalYear,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinStatError {
    fn from(e: serde_json::Error) -> Self {
        FinStatError::SerializationError(e.to_string())
    }
}
