//! Single lump-sum prepayment applied at the end of a chosen month.
//!
//! Rows up to the event month are the ordinary schedule. The event row
//! carries the lump sum, and the remaining balance is re-amortised either
//! at the original installment (shorter tenure) or over the original
//! remaining term (smaller installment).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::emi::compute_emi;
use super::schedule::{amortize_segment, Segment};
use super::{LoanTerms, ScheduleRow};
use crate::error::LoanNavigatorError;
use crate::types::{round_currency, Money, Rate};
use crate::LoanNavigatorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the schedule is recomputed after a prepayment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentMode {
    /// Keep the installment, finish earlier.
    #[default]
    ReduceTenure,
    /// Keep the end date, lower the installment.
    ReduceEmi,
}

/// A lump sum paid at the end of `month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentEvent {
    /// 1-based month the payment is made in.
    pub month: u32,
    pub amount: Money,
    #[serde(default)]
    pub mode: PrepaymentMode,
}

/// Schedule produced by a prepayment, with the installments that govern it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentSchedule {
    pub rows: Vec<ScheduleRow>,
    /// Installment before the event.
    pub original_emi: Money,
    /// Installment after the event under `ReduceEmi`. `None` under
    /// `ReduceTenure`, or when the prepayment retires the loan.
    pub revised_emi: Option<Money>,
}

impl PrepaymentSchedule {
    /// The installment a borrower would quote for this schedule.
    pub fn governing_emi(&self) -> Money {
        self.revised_emi.unwrap_or(self.original_emi)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Schedule rows for a loan with one prepayment.
pub fn with_prepayment(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
    month: u32,
    amount: Money,
    mode: PrepaymentMode,
) -> LoanNavigatorResult<Vec<ScheduleRow>> {
    let terms = LoanTerms::new(principal, annual_rate_percent, tenure_months);
    let event = PrepaymentEvent {
        month,
        amount,
        mode,
    };
    Ok(apply_prepayment(&terms, &event)?.rows)
}

/// Apply `event` to the loan described by `terms`.
pub fn apply_prepayment(
    terms: &LoanTerms,
    event: &PrepaymentEvent,
) -> LoanNavigatorResult<PrepaymentSchedule> {
    terms.validate()?;
    validate_event(terms, event)?;

    let original_emi = compute_emi(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_months,
    )?;
    let rate = terms.monthly_rate();

    let mut rows = amortize_segment(&Segment {
        first_month: 1,
        opening_balance: terms.principal,
        monthly_rate: rate,
        installment: original_emi,
        max_months: event.month,
        closes_loan: event.month == terms.tenure_months,
    })?;

    let event_row = match rows.last_mut() {
        Some(row) if row.month == event.month && row.closing_balance > Decimal::ZERO => row,
        _ => {
            return Err(LoanNavigatorError::PrepaymentInfeasible {
                month: event.month,
                reason: "loan is already fully repaid by this month".into(),
            })
        }
    };

    if event.amount > event_row.closing_balance {
        return Err(LoanNavigatorError::PrepaymentInfeasible {
            month: event.month,
            reason: format!(
                "amount {} exceeds outstanding balance {}",
                event.amount,
                round_currency(event_row.closing_balance)
            ),
        });
    }

    event_row.prepayment_amount = event.amount;
    event_row.closing_balance -= event.amount;
    let balance = event_row.closing_balance;

    if balance.is_zero() {
        return Ok(PrepaymentSchedule {
            rows,
            original_emi,
            revised_emi: None,
        });
    }

    // A positive balance means the event row was not the last scheduled month.
    let remaining_months = terms.tenure_months - event.month;
    let (installment, revised_emi) = match event.mode {
        PrepaymentMode::ReduceTenure => (original_emi, None),
        PrepaymentMode::ReduceEmi => {
            let emi = compute_emi(balance, terms.annual_rate_percent, remaining_months)?;
            (emi, Some(emi))
        }
    };

    let tail = amortize_segment(&Segment {
        first_month: event.month + 1,
        opening_balance: balance,
        monthly_rate: rate,
        installment,
        max_months: remaining_months,
        closes_loan: true,
    })?;
    rows.extend(tail);

    Ok(PrepaymentSchedule {
        rows,
        original_emi,
        revised_emi,
    })
}

fn validate_event(terms: &LoanTerms, event: &PrepaymentEvent) -> LoanNavigatorResult<()> {
    if event.month == 0 {
        return Err(LoanNavigatorError::InvalidInput {
            field: "prepayment.month".into(),
            reason: "Prepayment month is 1-based and must be at least 1".into(),
        });
    }
    if event.amount <= Decimal::ZERO {
        return Err(LoanNavigatorError::InvalidInput {
            field: "prepayment.amount".into(),
            reason: "Prepayment amount must be positive".into(),
        });
    }
    if event.month > terms.tenure_months {
        return Err(LoanNavigatorError::PrepaymentInfeasible {
            month: event.month,
            reason: format!("month is beyond the {}-month tenure", terms.tenure_months),
        });
    }
    Ok(())
}
