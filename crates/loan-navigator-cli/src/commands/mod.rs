pub mod amortization;
pub mod whatif;
