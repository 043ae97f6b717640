//! Progressive income tax calculation.
//!
//! Tax is computed with the quick-deduction method: the whole taxable
//! income is multiplied by the marginal rate of the bracket it falls in, and
//! the bracket's precomputed quick deduction is subtracted. This equals
//! taxing each slice of income at its own bracket's rate.
//!
//! Brackets are `(lower, upper]`: an income exactly on a threshold belongs
//! to the lower bracket.

use rust_decimal::Decimal;

use crate::config::{TaxBracket, TaxSchedule};

/// Finds the bracket whose `(lower, upper]` range contains `taxable_income`.
///
/// Returns `None` for non-positive income, which no bracket covers.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::find_bracket;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let bracket = find_bracket(Decimal::from(3000), config.tax()).unwrap();
///
/// assert_eq!(bracket.upper, Some(Decimal::from(3000)));
/// assert!(find_bracket(Decimal::ZERO, config.tax()).is_none());
/// ```
pub fn find_bracket(taxable_income: Decimal, schedule: &TaxSchedule) -> Option<&TaxBracket> {
    schedule
        .brackets()
        .iter()
        .find(|bracket| bracket.contains(taxable_income))
}

/// Computes the income tax owed on `taxable_income`.
///
/// Non-positive income owes no tax. Otherwise the result is
/// `taxable_income * rate - quick_deduction` for the containing bracket.
///
/// # Panics
///
/// Panics if no bracket contains a positive income. [`TaxSchedule::new`]
/// rejects schedules with gaps, so this only happens if the schedule itself
/// is malformed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_tax;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
///
/// assert_eq!(compute_tax(Decimal::from(3000), config.tax()), Decimal::from(90));
/// assert_eq!(
///     compute_tax(Decimal::from_str("3000.01").unwrap(), config.tax()),
///     Decimal::from_str("90.001").unwrap()
/// );
/// assert_eq!(compute_tax(Decimal::from(-500), config.tax()), Decimal::ZERO);
/// ```
pub fn compute_tax(taxable_income: Decimal, schedule: &TaxSchedule) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let bracket = find_bracket(taxable_income, schedule).unwrap_or_else(|| {
        panic!(
            "tax schedule has no bracket containing taxable income {}",
            taxable_income
        )
    });

    taxable_income * bracket.rate - bracket.quick_deduction
}
