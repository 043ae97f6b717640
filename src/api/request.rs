//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the calculation
//! endpoints. Amounts may be sent as JSON numbers or strings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Attendance, Employee, PayMonth};

/// Request body for `POST /insurance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceRequest {
    /// The monthly salary to insure.
    pub salary: Decimal,
}

/// Request body for `POST /tax`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Taxable income after insurance and the personal deduction.
    pub taxable_income: Decimal,
}

/// Request body for `POST /salary/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryEstimateRequest {
    /// Gross monthly salary.
    pub gross_salary: Decimal,
}

/// Request body for `POST /payroll/calculate`.
///
/// Employees and attendance come from the caller's registry and
/// timekeeping; the engine keeps no employee data of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The month being paid, as `YYYY-MM`.
    pub month: PayMonth,
    /// Employees from the registry.
    pub employees: Vec<Employee>,
    /// Attendance by employee ID.
    #[serde(default)]
    pub attendance: HashMap<String, Attendance>,
    /// Employees to pay; all active employees when empty.
    #[serde(default)]
    pub employee_ids: Vec<String>,
}
