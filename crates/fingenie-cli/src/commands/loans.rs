use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fingenie_core::loans::comparison::{self, LoanComparisonInput};
use fingenie_core::loans::interest_only;
use fingenie_core::loans::prepayment::{self, PrepaymentInput, PrepaymentStrategy};
use fingenie_core::loans::presets;
use fingenie_core::loans::{calculate_emi, LoanParameters};

use crate::input;

/// Loan terms shared by the EMI and interest-only commands
#[derive(Args)]
pub struct LoanTermsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,
}

impl LoanTermsArgs {
    fn resolve(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let annual_rate = self
            .annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?;
        let tenure_months = self
            .tenure_months
            .ok_or("--tenure-months is required (or provide --input)")?;
        Ok(LoanParameters::new(principal, annual_rate, tenure_months))
    }
}

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,

    /// Only include the first N months of the schedule in the output
    #[arg(long)]
    pub months: Option<usize>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.terms.resolve()?;
    let mut result = calculate_emi(&params)?;
    if let Some(months) = args.months {
        result.result.schedule.truncate(months);
    }
    Ok(serde_json::to_value(result)?)
}

/// Arguments for interest-only loan calculation
#[derive(Args)]
pub struct InterestOnlyArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

pub fn run_interest_only(args: InterestOnlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.terms.resolve()?;
    let result = interest_only::calculate_interest_only(&params)?;
    Ok(serde_json::to_value(result)?)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Keep the EMI, shorten the loan
    ReduceTenure,
    /// Keep the end date, lower the EMI
    ReduceEmi,
}

impl From<StrategyArg> for PrepaymentStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ReduceTenure => PrepaymentStrategy::ReduceTenure,
            StrategyArg::ReduceEmi => PrepaymentStrategy::ReduceEmi,
        }
    }
}

/// Arguments for prepayment savings calculation
#[derive(Args)]
pub struct PrepaymentArgs {
    #[command(flatten)]
    pub terms: LoanTermsArgs,

    /// Lump sum paid against principal
    #[arg(long)]
    pub prepayment_amount: Option<Decimal>,

    /// Month (1-based) at whose end the lump sum is paid
    #[arg(long)]
    pub prepayment_month: Option<u32>,

    /// What to keep constant after prepaying
    #[arg(long, value_enum, default_value = "reduce-tenure")]
    pub strategy: StrategyArg,
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pp_input: PrepaymentInput = if let Some(ref path) = args.terms.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let loan = args.terms.resolve()?;
        let prepayment_amount = args
            .prepayment_amount
            .ok_or("--prepayment-amount is required (or provide --input)")?;
        let prepayment_month = args
            .prepayment_month
            .ok_or("--prepayment-month is required (or provide --input)")?;

        PrepaymentInput {
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            tenure_months: loan.tenure_months,
            prepayment_amount,
            prepayment_month,
            strategy: args.strategy.into(),
        }
    };

    let result = prepayment::calculate_prepayment(&pp_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for loan comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file with a "loans" array
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: LoanComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for loan comparison".into());
    };
    let result = comparison::compare_loans(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(presets::default_presets())?)
}
