pub mod dataset;
pub mod error;
pub mod growth;
pub mod health;
pub mod ratios;
pub mod statements;
pub mod summary;
pub mod types;

pub use error::FinStatError;
pub use types::*;

/// Standard result type for all finstat operations
pub type FinStatResult<T> = Result<T, FinStatError>;
