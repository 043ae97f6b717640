//! Social insurance and housing fund calculation.
//!
//! The salary is clamped into the contribution base band once, and every
//! category's rate is applied to that clamped base for both the employee and
//! the employer. No rounding is applied.
//!
//! ## Reporting
//!
//! - `social_insurance_total` sums pension, medical, unemployment, injury and
//!   maternity. Injury and maternity carry no employee rate, so on the
//!   employee side this is pension + medical + unemployment.
//! - The housing fund is computed the same way but reported separately.

use rust_decimal::Decimal;

use crate::config::InsuranceScheme;
use crate::error::EngineResult;
use crate::models::{
    CategoryContribution, ContributionSide, InsuranceBreakdown, InsuranceCategory, SideBreakdown,
};

use super::rounding::require_non_negative;

/// Computes one side's contributions on an already clamped base.
///
/// # Arguments
///
/// * `base` - The contribution base, already clamped into the band
/// * `side` - Which party's rates to apply
/// * `scheme` - The band and rate table
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_side;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{ContributionSide, InsuranceCategory};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let employer = compute_side(Decimal::from(10000), ContributionSide::Employer, config.insurance());
///
/// assert_eq!(employer.amount(InsuranceCategory::Injury), Decimal::from(20));
/// assert_eq!(employer.social_insurance_total, Decimal::from(2780));
/// ```
pub fn compute_side(base: Decimal, side: ContributionSide, scheme: &InsuranceScheme) -> SideBreakdown {
    let contributions: Vec<CategoryContribution> = InsuranceCategory::ALL
        .into_iter()
        .map(|category| {
            let rate = scheme.rates.rate(category).for_side(side);
            CategoryContribution {
                category,
                rate,
                amount: base * rate,
            }
        })
        .collect();

    let social_insurance_total = contributions
        .iter()
        .filter(|c| c.category.is_social_insurance())
        .map(|c| c.amount)
        .sum();

    let housing_fund = contributions
        .iter()
        .filter(|c| c.category == InsuranceCategory::HousingFund)
        .map(|c| c.amount)
        .sum();

    SideBreakdown {
        side,
        contributions,
        social_insurance_total,
        housing_fund,
    }
}

/// Computes employee and employer insurance contributions for a salary.
///
/// The salary is clamped into `[band.min, band.max]` first: salaries below
/// the floor are charged at the floor, salaries above the ceiling at the
/// ceiling. Both sides use the clamped base.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// if `salary` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_insurance;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::InsuranceCategory;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("config/beijing_2024").unwrap();
/// let result = compute_insurance(Decimal::from(15000), config.insurance()).unwrap();
///
/// assert_eq!(result.base, Decimal::from(15000));
/// assert_eq!(result.employee.amount(InsuranceCategory::Pension), Decimal::from(1200));
/// assert_eq!(result.employee_insurance_total(), Decimal::from(1575));
/// assert_eq!(result.housing_fund(), Decimal::from(1800));
/// ```
pub fn compute_insurance(
    salary: Decimal,
    scheme: &InsuranceScheme,
) -> EngineResult<InsuranceBreakdown> {
    let salary = require_non_negative("salary", salary)?;
    let base = scheme.base_band.clamp(salary);

    Ok(InsuranceBreakdown {
        salary,
        base,
        employee: compute_side(base, ContributionSide::Employee, scheme),
        employer: compute_side(base, ContributionSide::Employer, scheme),
    })
}
