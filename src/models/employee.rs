//! Employee and attendance models.
//!
//! This module defines the [`Employee`] record supplied by the employee
//! registry and the [`Attendance`] figures supplied by timekeeping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an employee is currently on the payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and paid.
    #[default]
    Active,
    /// Left the company or suspended; skipped by full payroll runs.
    Inactive,
}

/// An employee as supplied by the employee registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Gross monthly base salary before attendance adjustments.
    pub base_salary: Decimal,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee is on the payroll.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "1".to_string(),
    ///     name: "Zhang San".to_string(),
    ///     department: "Engineering".to_string(),
    ///     position: "Senior Engineer".to_string(),
    ///     base_salary: Decimal::from(15000),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Attendance figures for one employee over one pay month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attendance {
    /// Unpaid leave taken, in days (fractions allowed).
    #[serde(default)]
    pub leave_days: Decimal,
    /// Overtime worked, in hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
}
