//! Level monthly installment (EMI) for a fixed-rate loan.
//!
//! `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate. The
//! result is returned unrounded so the schedule recurrence does not compound
//! rounding error month after month.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanNavigatorError;
use crate::types::{Money, Rate};
use crate::LoanNavigatorResult;

/// Longest tenure accepted, in months (100 years).
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// Annual rates must stay strictly below this percentage.
const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage rate into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Fixed monthly installment that retires `principal` over `tenure_months`
/// at `annual_rate_percent` p.a.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
) -> LoanNavigatorResult<Money> {
    validate_terms(principal, annual_rate_percent, tenure_months)?;
    level_installment(
        principal,
        monthly_rate(annual_rate_percent),
        tenure_months,
    )
}

/// Annuity payment for an already-validated balance, monthly rate and term.
fn level_installment(principal: Money, rate: Rate, months: u32) -> LoanNavigatorResult<Money> {
    let n = Decimal::from(months);

    // (1+r)^n beyond the decimal range: the annuity factor has converged to 1.
    let Some(growth) = (Decimal::ONE + rate).checked_powi(i64::from(months)) else {
        return Ok(principal * rate);
    };

    let denominator = growth - Decimal::ONE;
    if rate.is_zero() || denominator.is_zero() {
        return Ok(principal / n);
    }

    (principal * rate)
        .checked_mul(growth / denominator)
        .ok_or_else(|| LoanNavigatorError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount is too large for decimal precision".into(),
        })
}

pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_months: u32,
) -> LoanNavigatorResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanNavigatorError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_percent <= Decimal::ZERO {
        return Err(LoanNavigatorError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual interest rate must be positive".into(),
        });
    }
    if annual_rate_percent >= MAX_ANNUAL_RATE_PERCENT {
        return Err(LoanNavigatorError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!("Annual interest rate must be below {MAX_ANNUAL_RATE_PERCENT}%"),
        });
    }
    if tenure_months == 0 {
        return Err(LoanNavigatorError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Tenure must be at least 1 month".into(),
        });
    }
    if tenure_months > MAX_TENURE_MONTHS {
        return Err(LoanNavigatorError::InvalidInput {
            field: "tenure_months".into(),
            reason: format!("Tenure must not exceed {MAX_TENURE_MONTHS} months"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_ten_percent() {
        let r = monthly_rate(dec!(12));
        assert_eq!(r, dec!(0.01));
    }

    #[test]
    fn test_emi_reference_loan() {
        // 100k at 10% over 12 months: standard annuity ≈ 8791.59
        let emi = compute_emi(dec!(100000), dec!(10), 12).unwrap();
        assert_eq!(emi.round_dp(2), dec!(8791.59));
    }

    #[test]
    fn test_emi_is_not_prerounded() {
        let emi = compute_emi(dec!(100000), dec!(10), 12).unwrap();
        assert!(emi.scale() > 2);
    }

    #[test]
    fn test_emi_single_month() {
        // One installment repays principal plus one month's interest.
        let emi = compute_emi(dec!(1200), dec!(12), 1).unwrap();
        assert_eq!(emi.round_dp(10), dec!(1212));
    }

    #[test]
    fn test_emi_rate_rounding_to_zero_falls_back_to_straight_line() {
        // 1e-28 % p.a. vanishes once divided down to a monthly rate.
        let tiny = Decimal::new(1, 28);
        let emi = compute_emi(dec!(1200), tiny, 12).unwrap();
        assert_eq!(emi, dec!(100));
    }

    #[test]
    fn test_emi_overflowing_growth_uses_limit() {
        // (1 + 0.99/12)^1200 is far outside the decimal range.
        let emi = compute_emi(dec!(1000), dec!(99), 1200).unwrap();
        assert_eq!(emi, dec!(1000) * monthly_rate(dec!(99)));
    }

    #[test]
    fn test_emi_long_tenure_higher_than_interest() {
        let p = dec!(500000);
        let emi = compute_emi(p, dec!(8.5), 360).unwrap();
        let first_interest = p * monthly_rate(dec!(8.5));
        assert!(emi > first_interest);
        assert_eq!(emi.round_dp(2), dec!(3844.57));
    }

    #[test]
    fn test_emi_huge_principal_is_an_error_not_a_panic() {
        // One month at 12%: installment is 1.01 × principal.
        let result = compute_emi(Decimal::MAX, dec!(12), 1);
        assert!(matches!(
            result,
            Err(LoanNavigatorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_emi_rejects_bad_inputs() {
        assert!(compute_emi(Decimal::ZERO, dec!(10), 12).is_err());
        assert!(compute_emi(dec!(-5), dec!(10), 12).is_err());
        assert!(compute_emi(dec!(1000), Decimal::ZERO, 12).is_err());
        assert!(compute_emi(dec!(1000), dec!(100), 12).is_err());
        assert!(compute_emi(dec!(1000), dec!(10), 0).is_err());
        assert!(compute_emi(dec!(1000), dec!(10), 1201).is_err());
    }

    #[test]
    fn test_emi_error_names_field() {
        match compute_emi(dec!(1000), dec!(10), 0) {
            Err(LoanNavigatorError::InvalidInput { field, .. }) => {
                assert_eq!(field, "tenure_months")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
