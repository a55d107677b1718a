use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanNavigatorError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Prepayment infeasible at month {month}: {reason}")]
    PrepaymentInfeasible { month: u32, reason: String },

    #[error("Loan does not amortise: installment {installment} does not exceed interest {interest} in month {month}")]
    NonAmortizing {
        month: u32,
        installment: Decimal,
        interest: Decimal,
    },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
