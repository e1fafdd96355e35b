use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::types::{Money, Percent};
use crate::FinGenieResult;

/// Typical terms for a loan product, used to prefill the calculator form.
/// Tenures are in years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPreset {
    pub name: String,
    pub min_amount: Money,
    pub max_amount: Money,
    pub default_rate: Percent,
    pub min_tenure: u32,
    pub max_tenure: u32,
}

impl LoanPreset {
    fn new(
        name: &str,
        min_amount: Money,
        max_amount: Money,
        default_rate: Percent,
        min_tenure: u32,
        max_tenure: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            min_amount,
            max_amount,
            default_rate,
            min_tenure,
            max_tenure,
        }
    }

    pub fn validate(&self) -> FinGenieResult<()> {
        if self.name.trim().is_empty() {
            return Err(FinGenieError::invalid("name", "Preset name cannot be empty"));
        }
        if self.min_amount <= Money::ZERO || self.max_amount < self.min_amount {
            return Err(FinGenieError::invalid(
                "min_amount",
                format!("{}: amounts must be positive with min <= max", self.name),
            ));
        }
        if self.default_rate < Percent::ZERO {
            return Err(FinGenieError::invalid(
                "default_rate",
                format!("{}: default rate cannot be negative", self.name),
            ));
        }
        if self.min_tenure == 0 || self.max_tenure < self.min_tenure {
            return Err(FinGenieError::invalid(
                "min_tenure",
                format!("{}: tenures must be at least 1 year with min <= max", self.name),
            ));
        }
        Ok(())
    }
}

/// Built-in loan products.
pub fn default_presets() -> Vec<LoanPreset> {
    vec![
        LoanPreset::new("Home Loan", dec!(500_000), dec!(50_000_000), dec!(8.5), 5, 30),
        LoanPreset::new("Car Loan", dec!(100_000), dec!(5_000_000), dec!(9.5), 1, 7),
        LoanPreset::new("Personal Loan", dec!(50_000), dec!(2_500_000), dec!(12.5), 1, 5),
        LoanPreset::new("Education Loan", dec!(100_000), dec!(7_500_000), dec!(10), 5, 15),
        LoanPreset::new("Business Loan", dec!(200_000), dec!(10_000_000), dec!(14), 1, 10),
    ]
}
