//! Side-by-side comparison of several loan offers.

use serde::{Deserialize, Serialize};

use crate::error::FinGenieError;
use crate::loans::emi::{summarise, LoanParameters};
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent};
use crate::FinGenieResult;

/// One candidate loan. Unnamed loans are labelled by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub principal: Money,
    pub annual_rate: Percent,
    pub tenure_months: Months,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub loans: Vec<LoanOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedLoan {
    pub loan_name: String,
    pub principal: Money,
    pub annual_rate: Percent,
    pub tenure_months: Months,
    pub emi: Money,
    pub total_amount: Money,
    pub total_interest: Money,
    pub interest_percentage: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    /// Valid loans, cheapest EMI first.
    pub comparison: Vec<ComparedLoan>,
    pub best_emi: Option<ComparedLoan>,
    pub best_total_interest: Option<ComparedLoan>,
}

pub fn compare_loans(
    input: &LoanComparisonInput,
) -> FinGenieResult<ComputationOutput<LoanComparisonOutput>> {
    if input.loans.is_empty() {
        return Err(FinGenieError::invalid(
            "loans",
            "At least one loan is required for comparison",
        ));
    }

    let mut warnings: Vec<String> = Vec::new();
    let mut comparison: Vec<ComparedLoan> = Vec::with_capacity(input.loans.len());

    for (idx, loan) in input.loans.iter().enumerate() {
        let loan_name = loan
            .name
            .clone()
            .unwrap_or_else(|| format!("Loan {}", idx + 1));
        let params = LoanParameters::new(loan.principal, loan.annual_rate, loan.tenure_months);

        match summarise(&params) {
            Ok(summary) => comparison.push(ComparedLoan {
                loan_name,
                principal: loan.principal,
                annual_rate: loan.annual_rate,
                tenure_months: loan.tenure_months,
                emi: summary.emi,
                total_amount: summary.total_amount,
                total_interest: summary.total_interest,
                interest_percentage: summary.interest_percentage,
            }),
            Err(e) => warnings.push(format!("{loan_name} excluded: {e}")),
        }
    }

    // Stable sort keeps input order among equal EMIs.
    comparison.sort_by(|a, b| a.emi.cmp(&b.emi));

    let best_emi = comparison.first().cloned();
    let best_total_interest = comparison
        .iter()
        .min_by(|a, b| a.total_interest.cmp(&b.total_interest))
        .cloned();

    let output = LoanComparisonOutput {
        comparison,
        best_emi,
        best_total_interest,
    };

    Ok(with_metadata(
        "Loan comparison by EMI and total interest",
        &serde_json::json!({ "candidates": input.loans.len() }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn option(name: Option<&str>, rate: Percent, tenure: Months) -> LoanOption {
        LoanOption {
            name: name.map(String::from),
            principal: dec!(500_000),
            annual_rate: rate,
            tenure_months: tenure,
        }
    }

    #[test]
    fn test_sorted_by_emi_with_best_interest() {
        let input = LoanComparisonInput {
            loans: vec![
                option(Some("Short"), dec!(9), 60),
                option(Some("Long"), dec!(9), 180),
                option(None, dec!(8), 120),
            ],
        };
        let out = compare_loans(&input).unwrap().result;
        let names: Vec<&str> = out.comparison.iter().map(|c| c.loan_name.as_str()).collect();
        assert_eq!(names, vec!["Long", "Loan 3", "Short"]);
        assert_eq!(out.best_emi.unwrap().loan_name, "Long");
        assert_eq!(out.best_total_interest.unwrap().loan_name, "Short");
    }

    #[test]
    fn test_invalid_loans_are_reported() {
        let input = LoanComparisonInput {
            loans: vec![option(Some("Good"), dec!(9), 60), option(Some("Bad"), dec!(9), 0)],
        };
        let output = compare_loans(&input).unwrap();
        assert_eq!(output.result.comparison.len(), 1);
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].starts_with("Bad excluded"));
    }

    #[test]
    fn test_empty_comparison_rejected() {
        let input = LoanComparisonInput { loans: vec![] };
        assert_eq!(compare_loans(&input).unwrap_err().field(), "loans");
    }
}
