use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScheduleRow;
use crate::error::LoanNavigatorError;
use crate::types::Money;
use crate::LoanNavigatorResult;

/// Aggregates over a produced schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Number of rows actually produced.
    pub tenure_months: u32,
    pub total_interest: Money,
    /// Installments plus any prepayment.
    pub total_payment: Money,
}

/// Reduce a schedule to its totals.
pub fn totals(schedule: &[ScheduleRow]) -> LoanNavigatorResult<ScheduleTotals> {
    if schedule.is_empty() {
        return Err(LoanNavigatorError::InsufficientData(
            "Totals require at least one schedule row".into(),
        ));
    }

    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;
    for row in schedule {
        total_interest = total_interest
            .checked_add(row.interest_component)
            .ok_or_else(overflow)?;
        total_payment = total_payment
            .checked_add(row.installment_amount)
            .and_then(|sum| sum.checked_add(row.prepayment_amount))
            .ok_or_else(overflow)?;
    }

    Ok(ScheduleTotals {
        tenure_months: schedule.len() as u32,
        total_interest,
        total_payment,
    })
}

fn overflow() -> LoanNavigatorError {
    LoanNavigatorError::InvalidInput {
        field: "principal".into(),
        reason: "Total repayment exceeds decimal range".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{build_schedule, with_prepayment, PrepaymentMode};
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_reference_loan() {
        let rows = build_schedule(dec!(100000), dec!(10), 12).unwrap();
        let t = totals(&rows).unwrap();
        assert_eq!(t.tenure_months, 12);
        // ≈ 12 × 8791.59 − 100000
        assert!((t.total_interest - dec!(5499.08)).abs() < dec!(0.05));
        assert!((t.total_payment - t.total_interest - dec!(100000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_totals_include_prepayment() {
        let rows = with_prepayment(
            dec!(100000),
            dec!(10),
            12,
            6,
            dec!(20000),
            PrepaymentMode::ReduceTenure,
        )
        .unwrap();
        let t = totals(&rows).unwrap();
        assert_eq!(t.tenure_months, 10);
        assert!((t.total_payment - t.total_interest - dec!(100000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_totals_overflow_is_an_error_not_a_panic() {
        let rows = build_schedule(Decimal::MAX / dec!(1.05), dec!(99), 12).unwrap();
        match totals(&rows) {
            Err(LoanNavigatorError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_totals_empty_schedule_rejected() {
        assert!(matches!(
            totals(&[]),
            Err(LoanNavigatorError::InsufficientData(_))
        ));
    }
}
