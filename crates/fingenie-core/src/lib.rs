pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "affordability")]
pub mod affordability;

pub use error::FinGenieError;
pub use types::*;

/// Standard result type for all fingenie operations
pub type FinGenieResult<T> = Result<T, FinGenieError>;
