use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loans::emi::LoanParameters;
use crate::time_value::round_money;
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent};
use crate::FinGenieResult;

/// Interest-only loan: level interest payments, principal repaid as a balloon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestOnlyOutput {
    pub monthly_payment: Money,
    pub principal: Money,
    pub annual_rate: Percent,
    pub tenure_months: Months,
    pub total_interest: Money,
    /// Principal due with the final payment.
    pub balloon_payment: Money,
}

pub fn calculate_interest_only(
    params: &LoanParameters,
) -> FinGenieResult<ComputationOutput<InterestOnlyOutput>> {
    params.validate()?;

    let monthly_payment = round_money(params.principal * params.monthly_rate());
    let total_interest = monthly_payment * Decimal::from(params.tenure_months);

    let output = InterestOnlyOutput {
        monthly_payment,
        principal: params.principal,
        annual_rate: params.annual_rate,
        tenure_months: params.tenure_months,
        total_interest,
        balloon_payment: params.principal,
    };

    Ok(with_metadata(
        "Interest-only loan with balloon repayment",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_pct": params.annual_rate.to_string(),
            "tenure_months": params.tenure_months,
        }),
        Vec::new(),
        output,
    ))
}
