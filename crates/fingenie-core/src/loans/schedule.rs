//! Month-by-month amortisation schedule.
//!
//! Each month's interest is charged on the opening balance and rounded to the
//! minor unit; the rest of the installment retires principal. The final month
//! absorbs whatever balance is left so the schedule always closes at exactly
//! zero, regardless of rounding drift over the loop.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::loans::emi::LoanParameters;
use crate::time_value::round_money;
use crate::types::{Money, Months, Rate};
use crate::FinGenieResult;

/// One month of an amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month number.
    pub month: Months,
    /// Amount paid this month. Equal to the fixed EMI except when the balance
    /// is settled (final month or an early payoff).
    pub emi: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    /// Balance after this month's payment (and any prepayment).
    pub remaining_principal: Money,
    /// Cumulative amount paid through this month, prepayments included.
    pub total_paid: Money,
    /// Cumulative interest paid through this month.
    pub total_interest_paid: Money,
    /// Lump sum applied against principal at the end of this month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<Money>,
}

/// Running state of a reducing-balance loan, advanced one month at a time.
#[derive(Debug, Clone)]
pub(crate) struct Amortiser {
    balance: Money,
    rate: Rate,
    emi: Money,
    month: Months,
    total_paid: Money,
    total_interest: Money,
}

impl Amortiser {
    pub fn new(principal: Money, rate: Rate, emi: Money) -> Self {
        Self {
            balance: principal,
            rate,
            emi,
            month: 0,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn month(&self) -> Months {
        self.month
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }

    pub fn set_emi(&mut self, emi: Money) {
        self.emi = emi;
    }

    /// Advance one month. On the final month the whole balance is repaid.
    pub fn step(&mut self, is_final: bool) -> ScheduleEntry {
        self.month += 1;

        let interest_payment = round_money(self.balance * self.rate);
        let principal_payment = if is_final {
            self.balance
        } else {
            (self.emi - interest_payment)
                .max(Decimal::ZERO)
                .min(self.balance)
        };
        let payment = principal_payment + interest_payment;

        self.balance = (self.balance - principal_payment).max(Decimal::ZERO);
        self.total_paid += payment;
        self.total_interest += interest_payment;

        ScheduleEntry {
            month: self.month,
            emi: payment,
            principal_payment,
            interest_payment,
            remaining_principal: self.balance,
            total_paid: self.total_paid,
            total_interest_paid: self.total_interest,
            prepayment: None,
        }
    }

    /// Apply a lump sum against principal, returning the amount actually used.
    pub fn prepay(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.balance);
        self.balance -= applied;
        self.total_paid += applied;
        applied
    }
}

/// Amortise validated parameters at a fixed EMI over the full tenure.
pub(crate) fn amortise(params: &LoanParameters, emi: Money) -> Vec<ScheduleEntry> {
    let mut amortiser = Amortiser::new(params.principal, params.monthly_rate(), emi);
    (1..=params.tenure_months)
        .map(|month| amortiser.step(month == params.tenure_months))
        .collect()
}

/// Build the amortisation schedule for a loan repaid at `emi` per month.
///
/// Returns exactly `tenure_months` entries; the last entry's
/// `remaining_principal` is zero.
pub fn generate_schedule(params: &LoanParameters, emi: Money) -> FinGenieResult<Vec<ScheduleEntry>> {
    params.validate()?;
    if emi < Decimal::ZERO {
        return Err(FinGenieError::invalid("emi", "EMI cannot be negative"));
    }
    Ok(amortise(params, emi))
}
