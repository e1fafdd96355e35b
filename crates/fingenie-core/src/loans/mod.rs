//! Retail loan mathematics: EMI, amortisation schedules, prepayment,
//! interest-only loans, side-by-side comparison and form presets.

pub mod comparison;
pub mod emi;
pub mod interest_only;
pub mod prepayment;
pub mod presets;
pub mod schedule;

pub use emi::{calculate_emi, EmiOutput, LoanParameters};
pub use schedule::{generate_schedule, ScheduleEntry};
