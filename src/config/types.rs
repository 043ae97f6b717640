//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! invariant checks each table must pass before it is handed to a
//! calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionSide, InsuranceCategory};

/// Metadata about the jurisdiction a configuration applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// A short code for the jurisdiction (e.g., "CN-BJ").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// The date from which these tables apply.
    pub effective_date: NaiveDate,
    /// Where the figures were taken from.
    pub source: String,
}

/// Floor and ceiling applied to a salary before insurance is computed.
///
/// Salaries below the floor are still charged at the floor; salaries above
/// the ceiling are capped.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ContributionBaseBand;
/// use rust_decimal::Decimal;
///
/// let band = ContributionBaseBand {
///     min: Decimal::from(3613),
///     max: Decimal::from(31014),
/// };
/// assert_eq!(band.clamp(Decimal::from(2000)), Decimal::from(3613));
/// assert_eq!(band.clamp(Decimal::from(15000)), Decimal::from(15000));
/// assert_eq!(band.clamp(Decimal::from(50000)), Decimal::from(31014));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBaseBand {
    /// The lowest contribution base.
    pub min: Decimal,
    /// The highest contribution base.
    pub max: Decimal,
}

impl ContributionBaseBand {
    /// Clamps a salary into `[min, max]`.
    pub fn clamp(&self, salary: Decimal) -> Decimal {
        salary.max(self.min).min(self.max)
    }

    /// Checks that `0 < min <= max`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min <= Decimal::ZERO {
            return Err(EngineError::invalid_config(format!(
                "contribution base minimum must be positive, got {}",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(EngineError::invalid_config(format!(
                "contribution base minimum {} exceeds maximum {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// The employee and employer rate for one insurance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePair {
    /// Fraction of the contribution base paid by the employee.
    pub employee: Decimal,
    /// Fraction of the contribution base paid by the employer.
    pub employer: Decimal,
}

impl RatePair {
    /// Returns the rate paid by the given side.
    pub fn for_side(&self, side: ContributionSide) -> Decimal {
        match side {
            ContributionSide::Employee => self.employee,
            ContributionSide::Employer => self.employer,
        }
    }
}

/// Rates for every insurance category plus the housing fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRateTable {
    /// Pension insurance.
    pub pension: RatePair,
    /// Medical insurance.
    pub medical: RatePair,
    /// Unemployment insurance.
    pub unemployment: RatePair,
    /// Work-injury insurance (employer only).
    pub injury: RatePair,
    /// Maternity insurance (employer only).
    pub maternity: RatePair,
    /// Housing provident fund.
    pub housing_fund: RatePair,
}

impl InsuranceRateTable {
    /// Returns the rate pair for a category.
    pub fn rate(&self, category: InsuranceCategory) -> &RatePair {
        match category {
            InsuranceCategory::Pension => &self.pension,
            InsuranceCategory::Medical => &self.medical,
            InsuranceCategory::Unemployment => &self.unemployment,
            InsuranceCategory::Injury => &self.injury,
            InsuranceCategory::Maternity => &self.maternity,
            InsuranceCategory::HousingFund => &self.housing_fund,
        }
    }

    /// Checks that every rate is a fraction in `[0, 1]` and that the
    /// employer-only categories carry no employee rate.
    pub fn validate(&self) -> EngineResult<()> {
        for category in InsuranceCategory::ALL {
            let pair = self.rate(category);
            for (side, rate) in [("employee", pair.employee), ("employer", pair.employer)] {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(EngineError::invalid_config(format!(
                        "{} {} rate {} is outside [0, 1]",
                        category.as_str(),
                        side,
                        rate
                    )));
                }
            }
            if category.is_employer_only() && !pair.employee.is_zero() {
                return Err(EngineError::invalid_config(format!(
                    "{} is employer-only but has employee rate {}",
                    category.as_str(),
                    pair.employee
                )));
            }
        }
        Ok(())
    }
}

/// The contents of `insurance.yaml`: base band and rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceScheme {
    /// Floor and ceiling for the contribution base.
    pub base_band: ContributionBaseBand,
    /// Per-category rates.
    pub rates: InsuranceRateTable,
}

impl InsuranceScheme {
    /// Validates both the band and the rate table.
    pub fn validate(&self) -> EngineResult<()> {
        self.base_band.validate()?;
        self.rates.validate()
    }
}

/// One bracket of a progressive tax schedule.
///
/// The lower bound is exclusive and the upper bound inclusive; `upper` is
/// `None` for the top, unbounded bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Exclusive lower bound of taxable income.
    pub lower: Decimal,
    /// Inclusive upper bound of taxable income.
    pub upper: Option<Decimal>,
    /// Marginal rate applied to the whole taxable income.
    pub rate: Decimal,
    /// Constant subtracted after applying the marginal rate.
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Returns true if `income` falls in `(lower, upper]`.
    pub fn contains(&self, income: Decimal) -> bool {
        income > self.lower && self.upper.is_none_or(|upper| income <= upper)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TaxBracketsFile {
    pub brackets: Vec<TaxBracket>,
}

/// A validated, ordered progressive tax schedule.
///
/// A `TaxSchedule` can only be built through [`TaxSchedule::new`], which
/// checks that the brackets cover `(0, +inf)` without gaps or overlaps and
/// that the quick deductions keep the tax function continuous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule from brackets sorted ascending by bound.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if:
    /// - the list is empty or the first lower bound is not 0
    /// - a bracket's upper bound differs from the next bracket's lower bound
    /// - a bracket is empty (`upper <= lower`) or unbounded before the end
    /// - the last bracket is bounded
    /// - a rate is outside `[0, 1]`
    /// - a quick deduction does not equal
    ///   `previous_deduction + lower * (rate - previous_rate)`
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let first = brackets
            .first()
            .ok_or_else(|| EngineError::invalid_config("tax schedule has no brackets"))?;

        if !first.lower.is_zero() {
            return Err(EngineError::invalid_config(format!(
                "first tax bracket must start at 0, got {}",
                first.lower
            )));
        }
        if !first.quick_deduction.is_zero() {
            return Err(EngineError::invalid_config(format!(
                "first tax bracket must have quick deduction 0, got {}",
                first.quick_deduction
            )));
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} rate {} is outside [0, 1]",
                    index, bracket.rate
                )));
            }

            match bracket.upper {
                Some(upper) if index == last_index => {
                    return Err(EngineError::invalid_config(format!(
                        "last tax bracket must be unbounded, got upper bound {}",
                        upper
                    )));
                }
                Some(upper) if upper <= bracket.lower => {
                    return Err(EngineError::invalid_config(format!(
                        "tax bracket {} is empty: ({}, {}]",
                        index, bracket.lower, upper
                    )));
                }
                None if index != last_index => {
                    return Err(EngineError::invalid_config(format!(
                        "tax bracket {} is unbounded but is not the last bracket",
                        index
                    )));
                }
                _ => {}
            }

            if index == 0 {
                continue;
            }

            let previous = &brackets[index - 1];
            if previous.upper != Some(bracket.lower) {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} starts at {} but the previous bracket ends at {:?}",
                    index, bracket.lower, previous.upper
                )));
            }

            let expected = previous.quick_deduction + bracket.lower * (bracket.rate - previous.rate);
            if bracket.quick_deduction != expected {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} quick deduction {} should be {}",
                    index,
                    bracket.quick_deduction,
                    expected.normalize()
                )));
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl<'de> Deserialize<'de> for TaxSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<TaxBracket>::deserialize(deserializer)?;
        TaxSchedule::new(brackets).map_err(serde::de::Error::custom)
    }
}

/// Attendance and deduction constants used by the payroll orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Average paid working days per month (e.g., 21.75).
    pub days_per_month: Decimal,
    /// Working hours in a day, used to derive the hourly rate.
    pub hours_per_day: Decimal,
    /// Multiplier applied to the hourly rate for overtime (e.g., 1.5).
    pub overtime_multiplier: Decimal,
    /// Monthly personal deduction subtracted before tax (e.g., 5000).
    pub personal_deduction: Decimal,
}

impl PayrollPolicy {
    /// Checks that divisors and the multiplier are positive and the personal
    /// deduction is non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("days_per_month", self.days_per_month),
            ("hours_per_day", self.hours_per_day),
            ("overtime_multiplier", self.overtime_multiplier),
        ];
        for (name, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::invalid_config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.personal_deduction < Decimal::ZERO {
            return Err(EngineError::invalid_config(format!(
                "personal_deduction must not be negative, got {}",
                self.personal_deduction
            )));
        }
        Ok(())
    }
}

/// The complete configuration for one jurisdiction and rate year.
///
/// Every calculator takes the part of this value it needs as an explicit
/// argument; there are no process-wide tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JurisdictionConfig {
    metadata: JurisdictionMetadata,
    insurance: InsuranceScheme,
    tax: TaxSchedule,
    policy: PayrollPolicy,
}

impl JurisdictionConfig {
    /// Creates a configuration from its component parts, validating the
    /// insurance scheme and the policy.
    pub fn new(
        metadata: JurisdictionMetadata,
        insurance: InsuranceScheme,
        tax: TaxSchedule,
        policy: PayrollPolicy,
    ) -> EngineResult<Self> {
        insurance.validate()?;
        policy.validate()?;
        Ok(Self {
            metadata,
            insurance,
            tax,
            policy,
        })
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the insurance band and rates.
    pub fn insurance(&self) -> &InsuranceScheme {
        &self.insurance
    }

    /// Returns the tax schedule.
    pub fn tax(&self) -> &TaxSchedule {
        &self.tax
    }

    /// Returns the attendance and deduction policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }
}
