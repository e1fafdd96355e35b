pub mod affordability;
pub mod loans;
