use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fingenie_core::affordability::{self, AffordabilityInput};

use crate::input;

/// Arguments for EMI affordability calculation
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Monthly expenses excluding the new EMI
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Share of disposable income available for EMIs (default 0.4)
    #[arg(long)]
    pub emi_to_income_ratio: Option<Decimal>,

    /// Annual rate in percent, to estimate the largest affordable loan
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Tenure in months, to estimate the largest affordable loan
    #[arg(long)]
    pub tenure_months: Option<u32>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aff_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let monthly_income = args
            .monthly_income
            .ok_or("--monthly-income is required (or provide --input)")?;

        AffordabilityInput {
            monthly_income,
            monthly_expenses: args.monthly_expenses,
            emi_to_income_ratio: args.emi_to_income_ratio,
            annual_rate: args.annual_rate,
            tenure_months: args.tenure_months,
        }
    };

    let result = affordability::calculate_affordability(&aff_input)?;
    Ok(serde_json::to_value(result)?)
}
