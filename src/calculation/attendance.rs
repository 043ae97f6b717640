//! Attendance adjustments to the monthly base salary.
//!
//! Leave is deducted at the daily rate (`base_salary / days_per_month`) and
//! overtime is paid at the hourly rate (`daily_rate / hours_per_day`) times
//! the overtime multiplier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::Attendance;

use super::rounding::{require_in_range, require_non_negative};

/// Base salary after leave, plus overtime pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePay {
    /// `base_salary / days_per_month`.
    pub daily_rate: Decimal,
    /// `leave_days * daily_rate`.
    pub leave_deduction: Decimal,
    /// `base_salary - leave_deduction`.
    pub adjusted_base: Decimal,
    /// `overtime_hours * (daily_rate / hours_per_day) * overtime_multiplier`.
    pub overtime_pay: Decimal,
}

/// Applies leave and overtime to a monthly base salary.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the base salary, leave days or
/// overtime hours are negative, or if the leave days exceed
/// `days_per_month` (which would make the adjusted base negative), or if the
/// overtime pay does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_attendance_pay;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Attendance;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let attendance = Attendance {
///     leave_days: Decimal::ONE,
///     overtime_hours: Decimal::ZERO,
/// };
///
/// let pay = calculate_attendance_pay(Decimal::from(4350), &attendance, config.policy()).unwrap();
/// assert_eq!(pay.daily_rate, Decimal::from(200));
/// assert_eq!(pay.adjusted_base, Decimal::from(4150));
/// ```
pub fn calculate_attendance_pay(
    base_salary: Decimal,
    attendance: &Attendance,
    policy: &PayrollPolicy,
) -> EngineResult<AttendancePay> {
    let base_salary = require_non_negative("base_salary", base_salary)?;
    let leave_days = require_non_negative("leave_days", attendance.leave_days)?;
    let overtime_hours = require_non_negative("overtime_hours", attendance.overtime_hours)?;

    if leave_days > policy.days_per_month {
        return Err(EngineError::invalid_input(
            "leave_days",
            format!(
                "{} exceeds the {} paid days in a month",
                leave_days, policy.days_per_month
            ),
        ));
    }

    let daily_rate = base_salary / policy.days_per_month;
    let hourly_rate = daily_rate / policy.hours_per_day;
    let leave_deduction = require_in_range("leave_days", leave_days.checked_mul(daily_rate))?;
    let overtime_pay = require_in_range(
        "overtime_hours",
        overtime_hours
            .checked_mul(hourly_rate)
            .and_then(|pay| pay.checked_mul(policy.overtime_multiplier)),
    )?;

    Ok(AttendancePay {
        daily_rate,
        leave_deduction,
        adjusted_base: base_salary - leave_deduction,
        overtime_pay,
    })
}
