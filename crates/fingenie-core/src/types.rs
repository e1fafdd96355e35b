use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency amounts, rounded to paise/cents at every reported step.
pub type Money = Decimal;

/// Fractional ratios (0.4 = 40%).
pub type Rate = Decimal;

/// Values quoted in percent (8.5 = 8.5%). Loan rates travel this way on the wire.
pub type Percent = Decimal;

/// Loan tenures and month indices.
pub type Months = u32;

/// Result of a loan calculation together with how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Echo of the inputs and defaults the calculation ran with.
    pub assumptions: serde_json::Value,
    /// Non-fatal observations, e.g. a zero rate or a prepayment that closes the loan.
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Identical inputs always produce identical metadata, so outputs can be diffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

impl ComputationMetadata {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "decimal128, money rounded half-up to 2 dp".to_string(),
        }
    }
}

/// Wrap a loan result with its methodology, echoed assumptions and warnings.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or(serde_json::Value::Null),
        warnings,
        metadata: ComputationMetadata::current(),
    }
}
