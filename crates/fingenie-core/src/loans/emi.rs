//! Equated Monthly Installment (EMI) for a fixed-rate amortising loan.
//!
//! `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate as a
//! fraction, rounded half-up to the currency's minor unit. A zero rate falls
//! back to straight-line repayment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::loans::schedule::{self, ScheduleEntry};
use crate::time_value::{
    installment, monthly_rate, round_money, round_to, MAX_AMOUNT, MAX_ANNUAL_RATE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent, Rate};
use crate::FinGenieResult;

/// Longest tenure accepted (100 years).
pub const MAX_TENURE_MONTHS: Months = 1200;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Principal, annual rate and tenure of a fixed-rate loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5% a year).
    pub annual_rate: Percent,
    /// Loan tenure in months.
    pub tenure_months: Months,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate: Percent, tenure_months: Months) -> Self {
        Self {
            principal,
            annual_rate,
            tenure_months,
        }
    }

    pub fn validate(&self) -> FinGenieResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(FinGenieError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.principal > MAX_AMOUNT {
            return Err(FinGenieError::invalid(
                "principal",
                format!("Principal cannot exceed {MAX_AMOUNT}"),
            ));
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(FinGenieError::invalid(
                "annual_rate",
                "Annual rate cannot be negative",
            ));
        }
        if self.annual_rate > MAX_ANNUAL_RATE {
            return Err(FinGenieError::invalid(
                "annual_rate",
                format!("Annual rate cannot exceed {MAX_ANNUAL_RATE}%"),
            ));
        }
        if self.tenure_months == 0 {
            return Err(FinGenieError::invalid(
                "tenure_months",
                "Tenure must be at least 1 month",
            ));
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(FinGenieError::invalid(
                "tenure_months",
                format!("Tenure cannot exceed {MAX_TENURE_MONTHS} months"),
            ));
        }
        Ok(())
    }

    /// Monthly rate as a fraction.
    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate)
    }

    /// Fixed monthly installment, rounded to the minor unit. Assumes validated parameters.
    pub(crate) fn fixed_emi(&self) -> FinGenieResult<Money> {
        installment(self.principal, self.monthly_rate(), self.tenure_months).map(round_money)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// EMI with totals and the full amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutput {
    pub emi: Money,
    pub principal: Money,
    pub annual_rate: Percent,
    /// Monthly rate in percent, 4 dp.
    pub monthly_rate: Percent,
    pub tenure_months: Months,
    pub tenure_years: Decimal,
    /// Everything paid over the life of the loan.
    pub total_amount: Money,
    pub total_interest: Money,
    /// Interest as a share of the total amount paid, 1 dp.
    pub interest_percentage: Percent,
    pub schedule: Vec<ScheduleEntry>,
}

/// EMI, totals and schedule shared by the calculators built on top of it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EmiSummary {
    pub emi: Money,
    pub total_amount: Money,
    pub total_interest: Money,
    pub interest_percentage: Percent,
    pub schedule: Vec<ScheduleEntry>,
}

pub(crate) fn summarise(params: &LoanParameters) -> FinGenieResult<EmiSummary> {
    params.validate()?;

    let emi = params.fixed_emi()?;
    let schedule = schedule::amortise(params, emi);

    // emi * n, corrected by the final month's rounding adjustment.
    let total_amount = schedule.last().map(|e| e.total_paid).unwrap_or_default();
    let total_interest = total_amount - params.principal;
    let interest_percentage = if total_amount.is_zero() {
        Decimal::ZERO
    } else {
        round_to(total_interest / total_amount * dec!(100), 1)
    };

    Ok(EmiSummary {
        emi,
        total_amount,
        total_interest,
        interest_percentage,
        schedule,
    })
}

/// Compute the EMI, loan totals and month-by-month amortisation schedule.
pub fn calculate_emi(params: &LoanParameters) -> FinGenieResult<ComputationOutput<EmiOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    let summary = summarise(params)?;

    if params.annual_rate.is_zero() {
        warnings.push("Zero interest rate: principal repaid in equal instalments".into());
    }
    if summary.emi.is_zero() {
        warnings.push(
            "EMI rounds to zero at two decimal places; principal is settled in the final month"
                .into(),
        );
    }

    let output = EmiOutput {
        emi: summary.emi,
        principal: params.principal,
        annual_rate: params.annual_rate,
        monthly_rate: round_to(params.monthly_rate() * dec!(100), 4),
        tenure_months: params.tenure_months,
        tenure_years: round_to(Decimal::from(params.tenure_months) / dec!(12), 2),
        total_amount: summary.total_amount,
        total_interest: summary.total_interest,
        interest_percentage: summary.interest_percentage,
        schedule: summary.schedule,
    };

    Ok(with_metadata(
        "Fixed-rate EMI (reducing balance, monthly compounding)",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_pct": params.annual_rate.to_string(),
            "tenure_months": params.tenure_months,
            "rounding": "half-up to 2 dp",
        }),
        warnings,
        output,
    ))
}
