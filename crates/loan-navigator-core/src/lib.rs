pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "whatif")]
pub mod whatif;

pub use error::LoanNavigatorError;
pub use types::*;

/// Standard result type for all loan-navigator operations
pub type LoanNavigatorResult<T> = Result<T, LoanNavigatorError>;
