//! Prepayment what-if analysis at the request/response boundary.
//!
//! Accepts loan terms and an optional prepayment as plain JSON numbers,
//! runs the amortisation engine, and reports the governing installment,
//! totals and the full schedule with every currency field rounded to two
//! decimal places. Strings in numeric fields are rejected at
//! deserialisation; accepted numbers become `Decimal` through their
//! shortest decimal representation, never through binary arithmetic.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    apply_prepayment, build_schedule, compute_emi, totals, LoanTerms, PrepaymentEvent,
    PrepaymentMode, ScheduleRow,
};
use crate::types::{round_currency, with_metadata, ComputationOutput, Money, Rate};
use crate::LoanNavigatorResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A what-if request: loan terms plus an optional prepayment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfRequest {
    /// Amount borrowed.
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Money,
    /// APR in percent (0–100 exclusive).
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_interest_rate: Rate,
    /// Number of monthly installments (1–1200).
    pub tenure_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<PrepaymentRequest>,
}

/// Lump sum paid at the end of `month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentRequest {
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Money,
    #[serde(default)]
    pub mode: PrepaymentMode,
}

impl WhatIfRequest {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.loan_amount,
            self.annual_interest_rate,
            self.tenure_months,
        )
    }
}

impl PrepaymentRequest {
    pub fn event(&self) -> PrepaymentEvent {
        PrepaymentEvent {
            month: self.month,
            amount: self.amount,
            mode: self.mode,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One schedule row, rounded for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfRow {
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub opening: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub prepayment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub closing: Money,
}

impl From<&ScheduleRow> for WhatIfRow {
    fn from(row: &ScheduleRow) -> Self {
        WhatIfRow {
            month: row.month,
            opening: round_currency(row.opening_balance),
            interest: round_currency(row.interest_component),
            principal: round_currency(row.principal_component),
            emi: round_currency(row.installment_amount),
            prepayment: round_currency(row.prepayment_amount),
            closing: round_currency(row.closing_balance),
        }
    }
}

/// How the prepayment scenario compares with the untouched loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentSavings {
    pub baseline_tenure_months: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub baseline_total_interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_saved: Money,
    pub months_saved: u32,
}

/// What-if result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResponse {
    /// Governing installment: the original EMI, or the recomputed one
    /// after a `reduce_emi` prepayment.
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Money,
    /// Actual schedule length after any prepayment effect.
    pub tenure_months: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment: Money,
    pub schedule: Vec<WhatIfRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<PrepaymentSavings>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a what-if analysis.
pub fn analyze_whatif(
    request: &WhatIfRequest,
) -> LoanNavigatorResult<ComputationOutput<WhatIfResponse>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = request.terms();
    terms.validate()?;

    let original_emi = compute_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let baseline = build_schedule(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let baseline_totals = totals(&baseline)?;

    let (rows, emi, methodology, savings) = match &request.prepayment {
        None => (
            baseline,
            original_emi,
            "Level-Payment Amortisation Schedule",
            None,
        ),
        Some(prepayment) => {
            let event = prepayment.event();
            let outcome = apply_prepayment(&terms, &event)?;
            let scenario_totals = totals(&outcome.rows)?;

            let months_saved = baseline_totals
                .tenure_months
                .saturating_sub(scenario_totals.tenure_months);
            let interest_saved =
                round_currency(baseline_totals.total_interest - scenario_totals.total_interest);

            if outcome.rows.len() as u32 == event.month {
                warnings.push(format!(
                    "Prepayment of {} retires the loan at month {}",
                    round_currency(event.amount),
                    event.month
                ));
            } else if months_saved > 0 {
                warnings.push(format!("Tenure shortened by {months_saved} months"));
            }
            if interest_saved.is_zero() {
                warnings.push("Prepayment saves no interest at currency precision".into());
            }

            let methodology = match event.mode {
                PrepaymentMode::ReduceTenure => "Prepayment What-If (Reduce Tenure)",
                PrepaymentMode::ReduceEmi => "Prepayment What-If (Reduce EMI)",
            };
            let savings = PrepaymentSavings {
                baseline_tenure_months: baseline_totals.tenure_months,
                baseline_total_interest: round_currency(baseline_totals.total_interest),
                interest_saved,
                months_saved,
            };
            let emi = outcome.governing_emi();
            (outcome.rows, emi, methodology, Some(savings))
        }
    };

    let schedule_totals = totals(&rows)?;
    let output = WhatIfResponse {
        emi: round_currency(emi),
        tenure_months: schedule_totals.tenure_months,
        total_interest: round_currency(schedule_totals.total_interest),
        total_payment: round_currency(schedule_totals.total_payment),
        schedule: rows.iter().map(WhatIfRow::from).collect(),
        savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, request, warnings, elapsed, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoanNavigatorError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn request(prepayment: Option<PrepaymentRequest>) -> WhatIfRequest {
        WhatIfRequest {
            loan_amount: dec!(100000),
            annual_interest_rate: dec!(10),
            tenure_months: 12,
            prepayment,
        }
    }

    #[test]
    fn test_plain_schedule_response() {
        let out = analyze_whatif(&request(None)).unwrap();
        let r = &out.result;
        assert_eq!(r.emi, dec!(8791.59));
        assert_eq!(r.tenure_months, 12);
        assert_eq!(r.schedule.len(), 12);
        assert_eq!(r.schedule[11].closing, Decimal::ZERO);
        assert!(r.savings.is_none());
        assert!(out.warnings.is_empty());
        assert_eq!(out.methodology, "Level-Payment Amortisation Schedule");
    }

    #[test]
    fn test_rows_are_rounded_to_cents() {
        let out = analyze_whatif(&request(None)).unwrap();
        for row in &out.result.schedule {
            for v in [row.opening, row.interest, row.principal, row.emi, row.closing] {
                assert!(v.scale() <= 2, "{v} has more than two decimals");
            }
        }
    }

    #[test]
    fn test_reduce_emi_reports_revised_installment() {
        let out = analyze_whatif(&request(Some(PrepaymentRequest {
            month: 6,
            amount: dec!(20000),
            mode: PrepaymentMode::ReduceEmi,
        })))
        .unwrap();
        let r = &out.result;
        assert_eq!(r.emi, dec!(5360.36));
        assert_eq!(r.tenure_months, 12);
        let savings = r.savings.as_ref().unwrap();
        assert_eq!(savings.months_saved, 0);
        assert!(savings.interest_saved > Decimal::ZERO);
    }

    #[test]
    fn test_reduce_tenure_warns_about_shorter_loan() {
        let out = analyze_whatif(&request(Some(PrepaymentRequest {
            month: 6,
            amount: dec!(20000),
            mode: PrepaymentMode::ReduceTenure,
        })))
        .unwrap();
        assert_eq!(out.result.emi, dec!(8791.59));
        assert_eq!(out.result.tenure_months, 10);
        assert_eq!(out.result.savings.as_ref().unwrap().months_saved, 2);
        assert!(out.warnings.iter().any(|w| w.contains("shortened by 2 months")));
    }

    #[test]
    fn test_validation_failure_propagates() {
        let mut req = request(None);
        req.tenure_months = 0;
        assert!(matches!(
            analyze_whatif(&req),
            Err(LoanNavigatorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_request_rejects_string_numbers() {
        let json = r#"{"loan_amount": "100000", "annual_interest_rate": 10, "tenure_months": 12}"#;
        assert!(serde_json::from_str::<WhatIfRequest>(json).is_err());
    }

    #[test]
    fn test_request_defaults_mode_to_reduce_tenure() {
        let json = r#"{
            "loan_amount": 100000,
            "annual_interest_rate": 10.5,
            "tenure_months": 12,
            "prepayment": {"month": 3, "amount": 5000.25}
        }"#;
        let req: WhatIfRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.annual_interest_rate, dec!(10.5));
        let pp = req.prepayment.unwrap();
        assert_eq!(pp.amount, dec!(5000.25));
        assert_eq!(pp.mode, PrepaymentMode::ReduceTenure);
    }

    #[test]
    fn test_response_serialises_numbers() {
        let out = analyze_whatif(&request(None)).unwrap();
        let value = serde_json::to_value(&out.result).unwrap();
        assert!(value["emi"].is_number());
        assert!(value["schedule"][0]["opening"].is_number());
        assert!(value.get("savings").is_none());
    }
}
