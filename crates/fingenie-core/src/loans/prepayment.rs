//! One-time lump-sum prepayment against a fixed-rate loan.
//!
//! The loan amortises normally up to the prepayment month; the lump sum is
//! applied at the end of that month. Under `ReduceTenure` the original EMI
//! keeps running against the smaller balance, so the loan closes early.
//! Under `ReduceEmi` the installment is recomputed over the months that remain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::loans::emi::{summarise, LoanParameters};
use crate::loans::schedule::{Amortiser, ScheduleEntry};
use crate::time_value::{installment, round_money, round_to};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent};
use crate::FinGenieResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// What the borrower keeps constant after prepaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentStrategy {
    /// Same EMI, fewer months.
    #[default]
    ReduceTenure,
    /// Same end date, smaller EMI.
    ReduceEmi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_rate: Percent,
    pub tenure_months: Months,
    pub prepayment_amount: Money,
    /// 1-based month at whose end the lump sum is paid.
    pub prepayment_month: Months,
    #[serde(default)]
    pub strategy: PrepaymentStrategy,
}

impl PrepaymentInput {
    pub fn loan(&self) -> LoanParameters {
        LoanParameters::new(self.principal, self.annual_rate, self.tenure_months)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentOutput {
    pub strategy: PrepaymentStrategy,
    pub prepayment_amount: Money,
    /// Portion of the prepayment actually used; less than the amount when it
    /// exceeded the outstanding balance.
    pub prepayment_applied: Money,
    pub prepayment_month: Months,
    pub original_emi: Money,
    pub new_emi: Money,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_saved: Money,
    /// Interest saved as a percentage of the original total interest, 2 dp.
    pub savings_percentage: Percent,
    pub original_tenure_months: Months,
    pub new_tenure_months: Months,
    pub months_reduced: Months,
    /// Revised schedule, ending in the month the loan closes.
    pub schedule: Vec<ScheduleEntry>,
}

/// Recalculate a loan after a single prepayment and report the interest saved.
pub fn calculate_prepayment(
    input: &PrepaymentInput,
) -> FinGenieResult<ComputationOutput<PrepaymentOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    let params = input.loan();
    params.validate()?;

    if input.prepayment_amount <= Decimal::ZERO {
        return Err(FinGenieError::invalid(
            "prepayment_amount",
            "Prepayment amount must be positive",
        ));
    }
    if input.prepayment_month == 0 || input.prepayment_month > params.tenure_months {
        return Err(FinGenieError::invalid(
            "prepayment_month",
            format!(
                "Prepayment month must be between 1 and {}",
                params.tenure_months
            ),
        ));
    }

    let original = summarise(&params)?;
    let tenure = params.tenure_months;
    let rate = params.monthly_rate();

    let mut amortiser = Amortiser::new(params.principal, rate, original.emi);
    let mut schedule: Vec<ScheduleEntry> = Vec::with_capacity(tenure as usize);
    for month in 1..=input.prepayment_month {
        schedule.push(amortiser.step(month == tenure));
    }

    let balance_before = amortiser.balance();
    let applied = amortiser.prepay(input.prepayment_amount);
    if let Some(entry) = schedule.last_mut() {
        entry.prepayment = Some(applied);
        entry.remaining_principal = amortiser.balance();
        entry.total_paid += applied;
    }

    if balance_before.is_zero() {
        warnings.push(format!(
            "Loan is already repaid by month {}; prepayment has no effect",
            input.prepayment_month
        ));
    } else if amortiser.is_settled() {
        warnings.push(format!(
            "Prepayment of {} covers the outstanding balance of {}; loan closed in month {}",
            input.prepayment_amount, balance_before, input.prepayment_month
        ));
    }

    let mut new_emi = original.emi;
    if !amortiser.is_settled() {
        if input.strategy == PrepaymentStrategy::ReduceEmi {
            let remaining = tenure - amortiser.month();
            new_emi = round_money(installment(amortiser.balance(), rate, remaining)?);
            amortiser.set_emi(new_emi);
        }
        while !amortiser.is_settled() && amortiser.month() < tenure {
            let is_final = amortiser.month() + 1 == tenure;
            schedule.push(amortiser.step(is_final));
        }
    }

    let new_tenure_months = amortiser.month();
    let new_total_interest = amortiser.total_interest();
    let interest_saved = (original.total_interest - new_total_interest).max(Decimal::ZERO);
    let savings_percentage = if original.total_interest > Decimal::ZERO {
        round_to(interest_saved / original.total_interest * dec!(100), 2)
    } else {
        Decimal::ZERO
    };

    let output = PrepaymentOutput {
        strategy: input.strategy,
        prepayment_amount: input.prepayment_amount,
        prepayment_applied: applied,
        prepayment_month: input.prepayment_month,
        original_emi: original.emi,
        new_emi,
        original_total_interest: original.total_interest,
        new_total_interest,
        interest_saved,
        savings_percentage,
        original_tenure_months: tenure,
        new_tenure_months,
        months_reduced: tenure - new_tenure_months,
        schedule,
    };

    let methodology = match input.strategy {
        PrepaymentStrategy::ReduceTenure => "Lump-sum prepayment, EMI held constant (tenure reduced)",
        PrepaymentStrategy::ReduceEmi => "Lump-sum prepayment, tenure held constant (EMI reduced)",
    };

    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_pct": params.annual_rate.to_string(),
            "tenure_months": tenure,
            "prepayment_amount": input.prepayment_amount.to_string(),
            "prepayment_month": input.prepayment_month,
        }),
        warnings,
        output,
    ))
}
