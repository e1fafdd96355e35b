mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::loans::{CompareArgs, EmiArgs, InterestOnlyArgs, PrepaymentArgs};

/// Loan EMI, prepayment and affordability calculations
#[derive(Parser)]
#[command(
    name = "fingenie",
    version,
    about = "Loan EMI, prepayment and affordability calculations",
    long_about = "A CLI for retail loan calculations with decimal precision. Computes \
                  EMIs with full amortisation schedules, prepayment savings, \
                  interest-only payments, loan comparisons and EMI affordability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the EMI and amortisation schedule of a loan
    Emi(EmiArgs),
    /// Calculate interest saved by a one-time prepayment
    Prepayment(PrepaymentArgs),
    /// Calculate the maximum affordable EMI from income and expenses
    Affordability(AffordabilityArgs),
    /// Calculate payments on an interest-only loan
    InterestOnly(InterestOnlyArgs),
    /// Compare several loan offers side by side
    Compare(CompareArgs),
    /// List the built-in loan presets
    Presets,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Prepayment(args) => commands::loans::run_prepayment(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::InterestOnly(args) => commands::loans::run_interest_only(args),
        Commands::Compare(args) => commands::loans::run_compare(args),
        Commands::Presets => commands::loans::run_presets(),
        Commands::Version => {
            println!("fingenie {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
