use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use loan_navigator_core::amortization::{compute_emi, monthly_rate, LoanTerms};
use loan_navigator_core::types::{round_currency, with_metadata, Money, Rate};
use loan_navigator_core::whatif::{self, WhatIfRequest};

use crate::input;

/// Loan terms given as individual flags
#[derive(Args)]
pub struct LoanTermsArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 10 for 10%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,
}

impl LoanTermsArgs {
    pub fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = self
            .tenure
            .ok_or("--tenure is required (or provide --input)")?;
        Ok(LoanTerms::new(principal, rate, tenure))
    }
}

/// Loan terms from `--input` or stdin, else from flags. Structured input uses
/// the what-if request shape, so amounts must be JSON numbers.
fn resolve_terms(
    input: Option<&str>,
    flags: &LoanTermsArgs,
) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    match input::resolve::<WhatIfRequest>(input)? {
        Some(request) => {
            if request.prepayment.is_some() {
                return Err("prepayment is only accepted by `whatif`".into());
            }
            Ok(request.terms())
        }
        None => flags.to_terms(),
    }
}

/// Arguments for the EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to a JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

#[derive(Serialize)]
struct EmiSummary {
    emi: Money,
    emi_unrounded: Money,
    monthly_rate: Rate,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let terms = resolve_terms(args.input.as_deref(), &args.terms)?;
    debug!(?terms, "computing EMI");

    let emi = compute_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let summary = EmiSummary {
        emi: round_currency(emi),
        emi_unrounded: emi,
        monthly_rate: monthly_rate(terms.annual_rate_percent),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let result = with_metadata("Level-Payment Annuity (EMI)", &terms, vec![], elapsed, summary);
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: LoanTermsArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args.input.as_deref(), &args.terms)?;
    debug!(?terms, "building schedule");

    let request = WhatIfRequest {
        loan_amount: terms.principal,
        annual_interest_rate: terms.annual_rate_percent,
        tenure_months: terms.tenure_months,
        prepayment: None,
    };
    let result = whatif::analyze_whatif(&request)?;
    Ok(serde_json::to_value(result)?)
}
