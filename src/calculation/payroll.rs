//! Payroll orchestration.
//!
//! Combines the attendance adjustment, the social insurance calculator and
//! the income tax calculator into a salary breakdown, in this order:
//!
//! 1. Leave is deducted from the base salary; overtime is priced.
//! 2. Insurance is computed on the leave-adjusted base, not on overtime.
//! 3. Taxable income is the adjusted base plus overtime, minus employee
//!    insurance, housing fund and the personal deduction.
//! 4. Net salary is the adjusted base plus overtime, minus employee
//!    insurance, housing fund and tax.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::JurisdictionConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Attendance, Employee, PayMonth, PayrollRecord, SalaryBreakdown};

use super::attendance::calculate_attendance_pay;
use super::income_tax::{compute_tax, find_bracket};
use super::rounding::require_in_range;
use super::social_insurance::compute_insurance;

/// Computes the full salary breakdown for one employee and month.
///
/// # Arguments
///
/// * `base_salary` - Monthly base salary from the employee registry
/// * `attendance` - Leave days and overtime hours from timekeeping
/// * `config` - Rates, band, tax schedule and policy to apply
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a negative salary, negative
/// attendance figures, more leave days than paid days in a month, or pay
/// too large to represent.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_salary, round_currency};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Attendance;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let attendance = Attendance {
///     leave_days: Decimal::ZERO,
///     overtime_hours: Decimal::from(8),
/// };
///
/// let breakdown = calculate_salary(Decimal::from(15000), &attendance, &config).unwrap();
///
/// assert_eq!(breakdown.employee_insurance_total, Decimal::from(1575));
/// assert_eq!(round_currency(breakdown.overtime_pay), Decimal::from_str("1034.48").unwrap());
/// assert_eq!(round_currency(breakdown.tax), Decimal::from_str("555.95").unwrap());
/// assert_eq!(round_currency(breakdown.net_salary), Decimal::from_str("12103.53").unwrap());
/// ```
pub fn calculate_salary(
    base_salary: Decimal,
    attendance: &Attendance,
    config: &JurisdictionConfig,
) -> EngineResult<SalaryBreakdown> {
    let policy = config.policy();
    let pay = calculate_attendance_pay(base_salary, attendance, policy)?;

    let insurance = compute_insurance(pay.adjusted_base, config.insurance())?;
    let employee_insurance_total = insurance.employee_insurance_total();
    let housing_fund = insurance.housing_fund();

    let gross = require_in_range("base_salary", pay.adjusted_base.checked_add(pay.overtime_pay))?;
    let taxable_income = gross - employee_insurance_total - housing_fund - policy.personal_deduction;
    let tax = compute_tax(taxable_income, config.tax());
    let tax_bracket = find_bracket(taxable_income, config.tax()).copied();

    let net_salary = gross - employee_insurance_total - housing_fund - tax;
    let employer_cost =
        require_in_range("base_salary", gross.checked_add(insurance.employer.total()))?;

    Ok(SalaryBreakdown {
        base_salary,
        daily_rate: pay.daily_rate,
        leave_deduction: pay.leave_deduction,
        adjusted_base: pay.adjusted_base,
        overtime_pay: pay.overtime_pay,
        insurance,
        employee_insurance_total,
        housing_fund,
        taxable_income,
        tax,
        tax_bracket,
        net_salary,
        employer_cost,
    })
}

/// Computes the salary breakdown for a gross monthly salary with no leave
/// and no overtime.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::estimate_salary;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let breakdown = estimate_salary(Decimal::from(15000), &config).unwrap();
///
/// assert_eq!(breakdown.taxable_income, Decimal::from(6625));
/// assert_eq!(breakdown.tax, Decimal::from_str("452.5").unwrap());
/// assert_eq!(breakdown.net_salary, Decimal::from_str("11172.5").unwrap());
/// ```
pub fn estimate_salary(
    gross_salary: Decimal,
    config: &JurisdictionConfig,
) -> EngineResult<SalaryBreakdown> {
    calculate_salary(gross_salary, &Attendance::default(), config)
}

/// Computes payroll records for a month.
///
/// # Arguments
///
/// * `month` - The month being paid
/// * `employees` - Employees from the registry
/// * `attendance` - Attendance by employee ID; missing entries mean no leave
///   and no overtime
/// * `employee_ids` - Employees to pay, in output order; when empty, every
///   active employee is paid in registry order
/// * `config` - Rates, band, tax schedule and policy to apply
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] if `employee_ids` names an
/// employee not in `employees`, or the first calculation error for any
/// employee. No partial result is returned.
pub fn run_payroll(
    month: PayMonth,
    employees: &[Employee],
    attendance: &HashMap<String, Attendance>,
    employee_ids: &[String],
    config: &JurisdictionConfig,
) -> EngineResult<Vec<PayrollRecord>> {
    let selected: Vec<&Employee> = if employee_ids.is_empty() {
        employees.iter().filter(|e| e.is_active()).collect()
    } else {
        employee_ids
            .iter()
            .map(|id| {
                employees
                    .iter()
                    .find(|e| &e.id == id)
                    .ok_or_else(|| EngineError::EmployeeNotFound { id: id.clone() })
            })
            .collect::<EngineResult<_>>()?
    };

    selected
        .into_iter()
        .map(|employee| -> EngineResult<PayrollRecord> {
            let figures = attendance.get(&employee.id).copied().unwrap_or_default();
            let breakdown = calculate_salary(employee.base_salary, &figures, config)?;
            Ok(PayrollRecord::from_breakdown(&employee.id, month, &breakdown))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_currency;
    use crate::config::ConfigLoader;
    use crate::models::{EmployeeStatus, PayrollStatus};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> JurisdictionConfig {
        ConfigLoader::load("./config/beijing_2024").unwrap()
    }

    fn attendance(leave_days: &str, overtime_hours: &str) -> Attendance {
        Attendance {
            leave_days: dec(leave_days),
            overtime_hours: dec(overtime_hours),
        }
    }

    fn employee(id: &str, base_salary: &str, status: EmployeeStatus) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            department: "Finance".to_string(),
            position: "Accountant".to_string(),
            base_salary: dec(base_salary),
            status,
        }
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("1", "15000", EmployeeStatus::Active),
            employee("2", "12000", EmployeeStatus::Active),
            employee("3", "10000", EmployeeStatus::Inactive),
        ]
    }

    fn month() -> PayMonth {
        PayMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_estimate_for_15000() {
        let config = config();
        let breakdown = estimate_salary(dec("15000"), &config).unwrap();

        assert_eq!(breakdown.adjusted_base, dec("15000"));
        assert_eq!(breakdown.employee_insurance_total, dec("1575"));
        assert_eq!(breakdown.housing_fund, dec("1800"));
        assert_eq!(breakdown.taxable_income, dec("6625"));
        assert_eq!(breakdown.tax, dec("452.5"));
        assert_eq!(breakdown.net_salary, dec("11172.5"));
        assert_eq!(breakdown.employer_cost, dec("20970"));
        assert_eq!(breakdown.tax_bracket.unwrap().rate, dec("0.10"));
    }

    #[test]
    fn test_overtime_is_taxed_but_not_insured() {
        let config = config();
        let breakdown = calculate_salary(dec("15000"), &attendance("0", "8"), &config).unwrap();

        assert_eq!(breakdown.insurance.base, dec("15000"));
        assert_eq!(breakdown.employee_insurance_total, dec("1575"));
        assert_eq!(round_currency(breakdown.overtime_pay), dec("1034.48"));
        assert_eq!(round_currency(breakdown.taxable_income), dec("7659.48"));
        assert_eq!(round_currency(breakdown.tax), dec("555.95"));
        assert_eq!(round_currency(breakdown.net_salary), dec("12103.53"));
    }

    #[test]
    fn test_leave_reduces_insurance_base() {
        let config = config();
        let breakdown = calculate_salary(dec("10000"), &attendance("2", "0"), &config).unwrap();

        assert_eq!(round_currency(breakdown.adjusted_base), dec("9080.46"));
        assert_eq!(breakdown.insurance.base, breakdown.adjusted_base);
        assert_eq!(round_currency(breakdown.employee_insurance_total), dec("953.45"));
        assert_eq!(round_currency(breakdown.housing_fund), dec("1089.66"));
        assert_eq!(round_currency(breakdown.tax), dec("61.12"));
        assert_eq!(round_currency(breakdown.net_salary), dec("6976.24"));
    }

    #[test]
    fn test_low_salary_owes_no_tax() {
        let config = config();
        let breakdown = estimate_salary(dec("3000"), &config).unwrap();

        assert_eq!(breakdown.insurance.base, dec("3613"));
        assert!(breakdown.taxable_income < Decimal::ZERO);
        assert_eq!(breakdown.tax, Decimal::ZERO);
        assert!(breakdown.tax_bracket.is_none());
        assert_eq!(breakdown.net_salary, dec("2187.075"));
    }

    #[test]
    fn test_high_salary_is_insured_at_ceiling() {
        let config = config();
        let breakdown = estimate_salary(dec("50000"), &config).unwrap();

        assert_eq!(breakdown.insurance.base, dec("31014"));
        assert_eq!(breakdown.taxable_income, dec("38021.85"));
        assert_eq!(breakdown.tax, dec("6996.555"));
        assert_eq!(breakdown.net_salary, dec("36025.295"));
    }

    #[test]
    fn test_net_salary_identity() {
        let config = config();
        let breakdown = calculate_salary(dec("23456.78"), &attendance("1.5", "12"), &config).unwrap();

        let expected = breakdown.adjusted_base + breakdown.overtime_pay
            - breakdown.employee_insurance_total
            - breakdown.housing_fund
            - breakdown.tax;
        assert_eq!(breakdown.net_salary, expected);
    }

    #[test]
    fn test_invalid_attendance_is_reported() {
        let config = config();
        let result = calculate_salary(dec("10000"), &attendance("30", "0"), &config);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_run_payroll_pays_active_employees_by_default() {
        let config = config();
        let records = run_payroll(month(), &roster(), &HashMap::new(), &[], &config).unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(records.iter().all(|r| r.status == PayrollStatus::Calculated));
        assert!(records.iter().all(|r| r.month == month()));
        assert_eq!(records[0].net_salary, dec("11172.5"));
    }

    #[test]
    fn test_run_payroll_applies_attendance() {
        let config = config();
        let mut figures = HashMap::new();
        figures.insert("2".to_string(), attendance("0", "8"));

        let records = run_payroll(
            month(),
            &roster(),
            &figures,
            &["2".to_string()],
            &config,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        let record = records[0].rounded();
        assert_eq!(record.base_salary, dec("12000"));
        assert_eq!(record.overtime, dec("827.59"));
        assert_eq!(record.social_insurance, dec("1260"));
        assert_eq!(record.housing_fund, dec("1440"));
        assert_eq!(record.tax, dec("302.76"));
        assert_eq!(record.net_salary, dec("9824.83"));
    }

    #[test]
    fn test_run_payroll_can_pay_inactive_employee_explicitly() {
        let config = config();
        let records =
            run_payroll(month(), &roster(), &HashMap::new(), &["3".to_string()], &config).unwrap();
        assert_eq!(records[0].employee_id, "3");
    }

    #[test]
    fn test_run_payroll_unknown_employee_fails() {
        let config = config();
        let result = run_payroll(
            month(),
            &roster(),
            &HashMap::new(),
            &["1".to_string(), "99".to_string()],
            &config,
        );

        match result {
            Err(EngineError::EmployeeNotFound { id }) => assert_eq!(id, "99"),
            other => panic!("Expected EmployeeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_payroll_records_have_distinct_ids() {
        let config = config();
        let records = run_payroll(month(), &roster(), &HashMap::new(), &[], &config).unwrap();
        assert_ne!(records[0].id, records[1].id);
    }

    proptest! {
        #[test]
        fn prop_salary_is_idempotent(
            salary_cents in 0i64..10_000_000,
            leave_tenths in 0i64..=217,
            overtime_hours in 0i64..80,
        ) {
            let config = config();
            let figures = Attendance {
                leave_days: Decimal::new(leave_tenths, 1),
                overtime_hours: Decimal::from(overtime_hours),
            };
            let salary = Decimal::new(salary_cents, 2);

            let first = calculate_salary(salary, &figures, &config).unwrap();
            let second = calculate_salary(salary, &figures, &config).unwrap();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_tax_never_negative(salary_cents in 0i64..10_000_000) {
            let config = config();
            let breakdown = estimate_salary(Decimal::new(salary_cents, 2), &config).unwrap();
            prop_assert!(breakdown.tax >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_salary_too_large_to_represent_is_rejected() {
        let config = config();
        let result = estimate_salary(Decimal::MAX, &config);

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "base_salary");
                assert_eq!(message, "out of range");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_payroll_reports_overflowing_employee() {
        let config = config();
        let employees = vec![Employee {
            base_salary: Decimal::MAX,
            ..employee("9", "0", EmployeeStatus::Active)
        }];

        let result = run_payroll(month(), &employees, &HashMap::new(), &[], &config);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }
}
