use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use loan_navigator_core::amortization::PrepaymentMode;
use loan_navigator_core::whatif::{self, PrepaymentRequest, WhatIfRequest};

use super::amortization::LoanTermsArgs;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Keep the installment and finish the loan earlier
    ReduceTenure,
    /// Keep the end date and lower the installment
    ReduceEmi,
}

impl From<ModeArg> for PrepaymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::ReduceTenure => PrepaymentMode::ReduceTenure,
            ModeArg::ReduceEmi => PrepaymentMode::ReduceEmi,
        }
    }
}

/// Arguments for a prepayment what-if
#[derive(Args)]
pub struct WhatIfArgs {
    /// Path to JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: LoanTermsArgs,

    /// Month (1-based) at the end of which the prepayment is made
    #[arg(long, requires = "prepay_amount")]
    pub prepay_month: Option<u32>,

    /// Prepayment amount
    #[arg(long, requires = "prepay_month")]
    pub prepay_amount: Option<Decimal>,

    /// How the schedule is recomputed after the prepayment
    #[arg(long, value_enum, default_value = "reduce-tenure")]
    pub mode: ModeArg,
}

impl WhatIfArgs {
    fn to_request(&self) -> Result<WhatIfRequest, Box<dyn std::error::Error>> {
        let terms = self.terms.to_terms()?;
        let prepayment = match (self.prepay_month, self.prepay_amount) {
            (Some(month), Some(amount)) => Some(PrepaymentRequest {
                month,
                amount,
                mode: self.mode.into(),
            }),
            _ => None,
        };
        Ok(WhatIfRequest {
            loan_amount: terms.principal,
            annual_interest_rate: terms.annual_rate_percent,
            tenure_months: terms.tenure_months,
            prepayment,
        })
    }
}

pub fn run_whatif(args: WhatIfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: WhatIfRequest = match input::resolve(args.input.as_deref())? {
        Some(request) => request,
        None => args.to_request()?,
    };
    debug!(
        tenure_months = request.tenure_months,
        has_prepayment = request.prepayment.is_some(),
        "running what-if"
    );

    let result = whatif::analyze_whatif(&request)?;
    Ok(serde_json::to_value(result)?)
}
