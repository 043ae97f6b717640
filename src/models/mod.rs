//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod insurance;
mod pay_period;

pub use calculation_result::{PayrollRecord, PayrollStatus, SalaryBreakdown};
pub use employee::{Attendance, Employee, EmployeeStatus};
pub use insurance::{
    CategoryContribution, ContributionSide, InsuranceBreakdown, InsuranceCategory, SideBreakdown,
};
pub use pay_period::PayMonth;
