//! Equal-installment loan amortisation.
//!
//! Layered leaf-to-root: [`emi`] prices the level installment, [`schedule`]
//! runs the month-by-month recurrence, [`prepayment`] injects a single lump
//! sum and re-amortises the remainder, and [`totals`] reduces any produced
//! schedule to its aggregates. Every function is pure; all math is in
//! `rust_decimal::Decimal`.

pub mod emi;
pub mod prepayment;
pub mod schedule;
pub mod totals;

use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};
use crate::LoanNavigatorResult;

pub use emi::{compute_emi, monthly_rate, MAX_TENURE_MONTHS};
pub use prepayment::{
    apply_prepayment, with_prepayment, PrepaymentEvent, PrepaymentMode, PrepaymentSchedule,
};
pub use schedule::build_schedule;
pub use totals::{totals, ScheduleTotals};

// ---------------------------------------------------------------------------
// Shared types
// ---------------------------------------------------------------------------

/// Fixed-rate loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (e.g., 10 = 10% p.a.).
    pub annual_rate_percent: Rate,
    /// Number of monthly installments.
    pub tenure_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Rate, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> LoanNavigatorResult<()> {
        emi::validate_terms(self.principal, self.annual_rate_percent, self.tenure_months)
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }
}

/// One month of an amortisation schedule.
///
/// Values carry full decimal precision; only `interest_component` is
/// rounded to currency precision as it is computed. Presentation layers
/// round the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    pub opening_balance: Money,
    pub interest_component: Money,
    pub principal_component: Money,
    /// `interest_component + principal_component`.
    pub installment_amount: Money,
    /// Lump sum paid at the end of this month, zero on ordinary rows.
    pub prepayment_amount: Money,
    /// `opening_balance - principal_component - prepayment_amount`.
    pub closing_balance: Money,
}
