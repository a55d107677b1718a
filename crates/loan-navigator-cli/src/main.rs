mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::amortization::{EmiArgs, ScheduleArgs};
use commands::whatif::WhatIfArgs;

/// Loan amortisation schedules and prepayment what-if analysis
#[derive(Parser)]
#[command(
    name = "loannav",
    version,
    about = "Loan amortisation schedules and prepayment what-if analysis",
    long_about = "A CLI for equal-installment (EMI) loan schedules with decimal precision. \
                  Computes the monthly installment, the month-by-month amortisation table, \
                  and the effect of a single lump-sum prepayment that either shortens the \
                  loan or lowers the installment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed monthly installment (EMI)
    Emi(EmiArgs),
    /// Build the full amortisation schedule with totals
    Schedule(ScheduleArgs),
    /// Simulate a lump-sum prepayment against the schedule
    Whatif(WhatIfArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = Instant::now();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Whatif(args) => commands::whatif::run_whatif(args),
        Commands::Version => {
            println!("loannav {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };
    debug!(elapsed_us = start.elapsed().as_micros() as u64, "command finished");

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
