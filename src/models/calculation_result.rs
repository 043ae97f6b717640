//! Calculation result models for the payroll engine.
//!
//! This module contains the [`SalaryBreakdown`] produced by the payroll
//! orchestrator for a single employee and month, and the [`PayrollRecord`]
//! row handed to persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::round_currency;
use crate::config::TaxBracket;

use super::{InsuranceBreakdown, PayMonth};

/// The full salary computation for one employee and one month.
///
/// Every amount is unrounded; use [`SalaryBreakdown::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Base salary before attendance adjustments.
    pub base_salary: Decimal,
    /// `base_salary / days_per_month`.
    pub daily_rate: Decimal,
    /// `leave_days * daily_rate`.
    pub leave_deduction: Decimal,
    /// Base salary after the leave deduction; the insurance salary.
    pub adjusted_base: Decimal,
    /// Overtime pay, taxed but not insured.
    pub overtime_pay: Decimal,
    /// Both sides of the insurance computation on `adjusted_base`.
    pub insurance: InsuranceBreakdown,
    /// The employee's social insurance total.
    pub employee_insurance_total: Decimal,
    /// The employee's housing fund contribution.
    pub housing_fund: Decimal,
    /// Income subject to tax; may be negative.
    pub taxable_income: Decimal,
    /// Income tax owed.
    pub tax: Decimal,
    /// The bracket the taxable income fell in, if positive.
    pub tax_bracket: Option<TaxBracket>,
    /// Take-home pay.
    pub net_salary: Decimal,
    /// Gross pay plus all employer contributions.
    pub employer_cost: Decimal,
}

impl SalaryBreakdown {
    /// Returns a copy with every monetary amount rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            base_salary: round_currency(self.base_salary),
            daily_rate: round_currency(self.daily_rate),
            leave_deduction: round_currency(self.leave_deduction),
            adjusted_base: round_currency(self.adjusted_base),
            overtime_pay: round_currency(self.overtime_pay),
            insurance: self.insurance.rounded(),
            employee_insurance_total: round_currency(self.employee_insurance_total),
            housing_fund: round_currency(self.housing_fund),
            taxable_income: round_currency(self.taxable_income),
            tax: round_currency(self.tax),
            tax_bracket: self.tax_bracket,
            net_salary: round_currency(self.net_salary),
            employer_cost: round_currency(self.employer_cost),
        }
    }
}

/// Lifecycle state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Computed and awaiting payment.
    Calculated,
}

/// One payroll row: an employee's computed pay for a month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayMonth, PayrollRecord, PayrollStatus};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let record = PayrollRecord {
///     id: Uuid::new_v4(),
///     employee_id: "1".to_string(),
///     month: "2024-03".parse::<PayMonth>().unwrap(),
///     base_salary: Decimal::from(15000),
///     overtime: Decimal::ZERO,
///     social_insurance: Decimal::from(1575),
///     housing_fund: Decimal::from(1800),
///     tax: Decimal::from(452),
///     net_salary: Decimal::from(11173),
///     status: PayrollStatus::Calculated,
/// };
/// assert_eq!(record.rounded().net_salary, Decimal::from(11173));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The employee this record pays.
    pub employee_id: String,
    /// The month being paid.
    pub month: PayMonth,
    /// Base salary after the leave deduction.
    pub base_salary: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Employee social insurance withheld.
    pub social_insurance: Decimal,
    /// Employee housing fund withheld.
    pub housing_fund: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Take-home pay.
    pub net_salary: Decimal,
    /// Lifecycle state.
    pub status: PayrollStatus,
}

impl PayrollRecord {
    /// Builds a freshly calculated record from a salary breakdown.
    pub fn from_breakdown(employee_id: &str, month: PayMonth, breakdown: &SalaryBreakdown) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month,
            base_salary: breakdown.adjusted_base,
            overtime: breakdown.overtime_pay,
            social_insurance: breakdown.employee_insurance_total,
            housing_fund: breakdown.housing_fund,
            tax: breakdown.tax,
            net_salary: breakdown.net_salary,
            status: PayrollStatus::Calculated,
        }
    }

    /// Returns a copy with every monetary amount rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            base_salary: round_currency(self.base_salary),
            overtime: round_currency(self.overtime),
            social_insurance: round_currency(self.social_insurance),
            housing_fund: round_currency(self.housing_fund),
            tax: round_currency(self.tax),
            net_salary: round_currency(self.net_salary),
            id: self.id,
            employee_id: self.employee_id.clone(),
            month: self.month,
            status: self.status,
        }
    }
}
