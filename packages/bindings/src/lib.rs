use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loan_navigator_core::amortization::{self, LoanTerms, ScheduleRow, ScheduleTotals};
use loan_navigator_core::whatif::{self, WhatIfRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Loan terms in the what-if request shape; amounts must be JSON numbers.
fn parse_terms(input_json: &str) -> NapiResult<LoanTerms> {
    let request: WhatIfRequest = serde_json::from_str(input_json).map_err(to_napi_error)?;
    if request.prepayment.is_some() {
        return Err(to_napi_error("prepayment is only accepted by analyzeWhatif"));
    }
    Ok(request.terms())
}

#[derive(Serialize, Deserialize)]
struct EmiResult {
    emi: Decimal,
}

#[derive(Serialize, Deserialize)]
struct ScheduleResult {
    rows: Vec<ScheduleRow>,
    totals: ScheduleTotals,
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let emi = amortization::compute_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&EmiResult { emi }).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let rows = amortization::build_schedule(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )
    .map_err(to_napi_error)?;
    let totals = amortization::totals(&rows).map_err(to_napi_error)?;
    serde_json::to_string(&ScheduleResult { rows, totals }).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// What-if
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_whatif(input_json: String) -> NapiResult<String> {
    let input: WhatIfRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = whatif::analyze_whatif(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
