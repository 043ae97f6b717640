//! Display rounding and numeric boundary helpers.
//!
//! The calculators never round; callers round a finished result for display
//! with [`round_currency`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds a monetary amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("90.001").unwrap()), Decimal::from_str("90.00").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("18.065").unwrap()), Decimal::from_str("18.07").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("-18.065").unwrap()), Decimal::from_str("-18.07").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a floating point amount into a [`Decimal`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming `field` if `value` is NaN,
/// infinite, or outside the range a `Decimal` can represent.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::decimal_from_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_from_f64("salary", 15000.0).unwrap(), Decimal::from(15000));
/// assert!(decimal_from_f64("salary", f64::NAN).is_err());
/// ```
pub fn decimal_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        EngineError::invalid_input(field, format!("{} is out of range", value))
    })
}

/// Rejects a negative amount.
pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Unwraps a checked arithmetic result, reporting overflow against `field`.
pub(crate) fn require_in_range(field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::invalid_input(field, "out of range"))
}
