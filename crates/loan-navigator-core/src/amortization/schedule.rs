//! Month-by-month amortisation schedule.
//!
//! [`amortize_segment`] is the only place the recurrence and the
//! close-the-loan reconciliation live. A plain schedule runs it once; a
//! prepayment schedule runs it before and after the event.

use rust_decimal::Decimal;

use super::emi::compute_emi;
use super::{monthly_rate, ScheduleRow};
use crate::error::LoanNavigatorError;
use crate::types::{round_currency, Money, Rate};
use crate::LoanNavigatorResult;

/// A run of level installments against one opening balance.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    /// Month number of the first row produced.
    pub first_month: u32,
    pub opening_balance: Money,
    pub monthly_rate: Rate,
    pub installment: Money,
    /// Upper bound on rows produced.
    pub max_months: u32,
    /// Whether row `max_months` is the loan's last; if so it is forced to a
    /// zero closing balance.
    pub closes_loan: bool,
}

/// Build the full schedule for a loan with no prepayment.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
) -> LoanNavigatorResult<Vec<ScheduleRow>> {
    let installment = compute_emi(principal, annual_rate_percent, tenure_months)?;

    amortize_segment(&Segment {
        first_month: 1,
        opening_balance: principal,
        monthly_rate: monthly_rate(annual_rate_percent),
        installment,
        max_months: tenure_months,
        closes_loan: true,
    })
}

/// Run the amortisation recurrence over a segment.
///
/// Interest is rounded to currency precision each month; principal and
/// balances carry full precision. The non-amortising guard compares the
/// installment with the unrounded interest. The row on which the loan closes, either
/// because the installment covers the remaining balance or because it is
/// the last month of a closing segment, absorbs the residue: its principal
/// becomes the whole opening balance and its closing balance exactly zero.
///
/// Stops early once the balance reaches zero, so the result may be shorter
/// than `max_months`.
pub(crate) fn amortize_segment(segment: &Segment) -> LoanNavigatorResult<Vec<ScheduleRow>> {
    let mut rows = Vec::with_capacity(segment.max_months as usize);
    let mut balance = segment.opening_balance;

    for offset in 0..segment.max_months {
        let month = segment.first_month + offset;
        let accrued = balance * segment.monthly_rate;

        // An installment at or below the accrued interest never reduces the balance.
        if segment.installment <= accrued {
            return Err(LoanNavigatorError::NonAmortizing {
                month,
                installment: segment.installment,
                interest: accrued,
            });
        }

        let interest = round_currency(accrued);
        // Rounding the interest up can exceed a sub-cent installment; such a
        // month repays no principal and the closing row settles the balance.
        let mut principal = (segment.installment - interest).max(Decimal::ZERO);

        let last_scheduled = segment.closes_loan && offset + 1 == segment.max_months;
        let closes = principal >= balance || last_scheduled;

        let mut installment = segment.installment;
        if closes {
            principal = balance;
            installment = interest + principal;
        } else if principal.is_zero() {
            installment = interest;
        }
        let closing = balance - principal;

        rows.push(ScheduleRow {
            month,
            opening_balance: balance,
            interest_component: interest,
            principal_component: principal,
            installment_amount: installment,
            prepayment_amount: Decimal::ZERO,
            closing_balance: closing,
        });

        if closes {
            break;
        }
        balance = closing;
    }

    Ok(rows)
}
