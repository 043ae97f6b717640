//! Calculation logic for the payroll engine.
//!
//! This module contains the social insurance calculator (contribution base
//! clamping and per-category contributions for both sides), the progressive
//! income tax calculator, the attendance adjustment, and the payroll
//! orchestrator that chains them into a salary breakdown.

mod attendance;
mod income_tax;
mod payroll;
mod rounding;
mod social_insurance;

pub use attendance::{AttendancePay, calculate_attendance_pay};
pub use income_tax::{compute_tax, find_bracket};
pub use payroll::{calculate_salary, estimate_salary, run_payroll};
pub use rounding::{decimal_from_f64, round_currency};
pub use social_insurance::{compute_insurance, compute_side};
