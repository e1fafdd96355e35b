//! EMI affordability from monthly income and expenses.
//!
//! The affordable EMI is a fixed share of disposable income. The result is
//! classified by how much of gross income it would consume, and optionally
//! converted into the largest loan that EMI could service.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::time_value::{
    monthly_rate, present_value, round_money, round_to, MAX_AMOUNT, MAX_ANNUAL_RATE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent, Rate};
use crate::FinGenieResult;

/// Share of disposable income available for EMIs when none is given.
pub const DEFAULT_EMI_TO_INCOME_RATIO: Rate = dec!(0.4);

/// EMI-to-income below this is conservative.
const CONSERVATIVE_CEILING: Rate = dec!(0.20);
/// EMI-to-income above this is aggressive.
const MODERATE_CEILING: Rate = dec!(0.35);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub monthly_income: Money,
    /// Monthly expenses excluding the prospective EMI.
    pub monthly_expenses: Money,
    /// Share of disposable income that may go to EMIs, in (0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_to_income_ratio: Option<Rate>,
    /// Annual rate in percent, for the maximum loan estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Percent>,
    /// Tenure in months, for the maximum loan estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<Months>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordabilityTier {
    Conservative,
    Moderate,
    Aggressive,
}

impl AffordabilityTier {
    /// Classify an EMI-to-gross-income ratio.
    pub fn classify(emi_to_income: Rate) -> Self {
        if emi_to_income < CONSERVATIVE_CEILING {
            AffordabilityTier::Conservative
        } else if emi_to_income <= MODERATE_CEILING {
            AffordabilityTier::Moderate
        } else {
            AffordabilityTier::Aggressive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AffordabilityTier::Conservative => "conservative",
            AffordabilityTier::Moderate => "moderate",
            AffordabilityTier::Aggressive => "aggressive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// Income left after expenses, floored at zero.
    pub available_for_emi: Money,
    pub emi_to_income_ratio: Rate,
    pub max_affordable_emi: Money,
    /// Affordable EMI as a percentage of gross income, 2 dp.
    pub emi_to_income_percentage: Percent,
    pub recommendation: AffordabilityTier,
    pub guidance: String,
    /// Largest principal the affordable EMI services at the given rate and tenure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_loan_amount: Option<Money>,
}

pub fn calculate_affordability(
    input: &AffordabilityInput,
) -> FinGenieResult<ComputationOutput<AffordabilityOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_income <= Decimal::ZERO {
        return Err(FinGenieError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if input.monthly_income > MAX_AMOUNT {
        return Err(FinGenieError::invalid(
            "monthly_income",
            format!("Monthly income cannot exceed {MAX_AMOUNT}"),
        ));
    }
    if input.monthly_expenses < Decimal::ZERO {
        return Err(FinGenieError::invalid(
            "monthly_expenses",
            "Monthly expenses cannot be negative",
        ));
    }
    if input.monthly_expenses > MAX_AMOUNT {
        return Err(FinGenieError::invalid(
            "monthly_expenses",
            format!("Monthly expenses cannot exceed {MAX_AMOUNT}"),
        ));
    }
    let ratio = input
        .emi_to_income_ratio
        .unwrap_or(DEFAULT_EMI_TO_INCOME_RATIO);
    if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
        return Err(FinGenieError::invalid(
            "emi_to_income_ratio",
            "EMI-to-income ratio must be in (0, 1]",
        ));
    }

    let disposable = input.monthly_income - input.monthly_expenses;
    if disposable < Decimal::ZERO {
        warnings.push(format!(
            "Expenses exceed income by {}; no EMI is affordable",
            -disposable
        ));
    }
    let available_for_emi = disposable.max(Decimal::ZERO);
    let max_affordable_emi = round_money(available_for_emi * ratio);

    let emi_share = max_affordable_emi / input.monthly_income;
    let recommendation = AffordabilityTier::classify(emi_share);
    let guidance = format!(
        "Keep total EMIs at or below {} a month ({} commitment)",
        max_affordable_emi,
        recommendation.as_str()
    );

    let max_loan_amount = match (input.annual_rate, input.tenure_months) {
        (Some(rate), Some(tenure)) => {
            if rate < Decimal::ZERO || rate > MAX_ANNUAL_RATE {
                return Err(FinGenieError::invalid(
                    "annual_rate",
                    format!("Annual rate must be between 0 and {MAX_ANNUAL_RATE}%"),
                ));
            }
            if tenure == 0 {
                return Err(FinGenieError::invalid(
                    "tenure_months",
                    "Tenure must be at least 1 month",
                ));
            }
            Some(round_money(present_value(
                max_affordable_emi,
                monthly_rate(rate),
                tenure,
            )?))
        }
        (None, None) => None,
        _ => {
            warnings.push(
                "Both annual_rate and tenure_months are needed to estimate a loan amount".into(),
            );
            None
        }
    };

    let output = AffordabilityOutput {
        monthly_income: input.monthly_income,
        monthly_expenses: input.monthly_expenses,
        available_for_emi,
        emi_to_income_ratio: ratio,
        max_affordable_emi,
        emi_to_income_percentage: round_to(emi_share * dec!(100), 2),
        recommendation,
        guidance,
        max_loan_amount,
    };

    Ok(with_metadata(
        "EMI affordability (share of disposable income)",
        &serde_json::json!({
            "emi_to_income_ratio": ratio.to_string(),
            "conservative_below": CONSERVATIVE_CEILING.to_string(),
            "aggressive_above": MODERATE_CEILING.to_string(),
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(income: Money, expenses: Money) -> AffordabilityInput {
        AffordabilityInput {
            monthly_income: income,
            monthly_expenses: expenses,
            emi_to_income_ratio: None,
            annual_rate: None,
            tenure_months: None,
        }
    }

    #[test]
    fn test_income_beyond_limit_rejected() {
        let mut inp = input(dec!(70_000_000_000_000_000_000_000_000_000), Decimal::ZERO);
        inp.emi_to_income_ratio = Some(Decimal::ONE);
        inp.annual_rate = Some(Decimal::ZERO);
        inp.tenure_months = Some(1200);
        let err = calculate_affordability(&inp).unwrap_err();
        assert_eq!(err.field(), "monthly_income");

        let err = calculate_affordability(&input(dec!(100_000), MAX_AMOUNT + Decimal::ONE)).unwrap_err();
        assert_eq!(err.field(), "monthly_expenses");
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AffordabilityTier::classify(dec!(0.1999)), AffordabilityTier::Conservative);
        assert_eq!(AffordabilityTier::classify(dec!(0.20)), AffordabilityTier::Moderate);
        assert_eq!(AffordabilityTier::classify(dec!(0.35)), AffordabilityTier::Moderate);
        assert_eq!(AffordabilityTier::classify(dec!(0.3501)), AffordabilityTier::Aggressive);
    }

    #[test]
    fn test_default_ratio_applied() {
        let out = calculate_affordability(&input(dec!(100_000), dec!(40_000)))
            .unwrap()
            .result;
        assert_eq!(out.emi_to_income_ratio, dec!(0.4));
        assert_eq!(out.max_affordable_emi, dec!(24_000));
        assert_eq!(out.emi_to_income_percentage, dec!(24));
    }

    #[test]
    fn test_expenses_above_income_floor_at_zero() {
        let output = calculate_affordability(&input(dec!(30_000), dec!(45_000))).unwrap();
        assert_eq!(output.result.available_for_emi, Decimal::ZERO);
        assert_eq!(output.result.max_affordable_emi, Decimal::ZERO);
        assert_eq!(output.result.recommendation, AffordabilityTier::Conservative);
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_ratio_out_of_range() {
        let mut inp = input(dec!(50_000), dec!(10_000));
        inp.emi_to_income_ratio = Some(dec!(1.5));
        let err = calculate_affordability(&inp).unwrap_err();
        assert_eq!(err.field(), "emi_to_income_ratio");

        inp.emi_to_income_ratio = Some(Decimal::ZERO);
        assert!(calculate_affordability(&inp).is_err());
    }

    #[test]
    fn test_partial_loan_terms_warn() {
        let mut inp = input(dec!(50_000), dec!(10_000));
        inp.annual_rate = Some(dec!(9));
        let output = calculate_affordability(&inp).unwrap();
        assert!(output.result.max_loan_amount.is_none());
        assert_eq!(output.warnings.len(), 1);
    }
}
