//! Social insurance models.
//!
//! This module contains the insurance categories, the side of the
//! employment relationship that pays a contribution, and the breakdown
//! values produced by the social insurance calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_currency;

/// An insurance category with its own employee and employer rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceCategory {
    /// Pension insurance.
    Pension,
    /// Medical insurance.
    Medical,
    /// Unemployment insurance.
    Unemployment,
    /// Work-injury insurance, paid by the employer only.
    Injury,
    /// Maternity insurance, paid by the employer only.
    Maternity,
    /// Housing provident fund, reported apart from social insurance.
    HousingFund,
}

impl InsuranceCategory {
    /// Every category, in reporting order.
    pub const ALL: [InsuranceCategory; 6] = [
        InsuranceCategory::Pension,
        InsuranceCategory::Medical,
        InsuranceCategory::Unemployment,
        InsuranceCategory::Injury,
        InsuranceCategory::Maternity,
        InsuranceCategory::HousingFund,
    ];

    /// Returns the snake_case name used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceCategory::Pension => "pension",
            InsuranceCategory::Medical => "medical",
            InsuranceCategory::Unemployment => "unemployment",
            InsuranceCategory::Injury => "injury",
            InsuranceCategory::Maternity => "maternity",
            InsuranceCategory::HousingFund => "housing_fund",
        }
    }

    /// True for the five statutory social insurance categories.
    pub fn is_social_insurance(&self) -> bool {
        *self != InsuranceCategory::HousingFund
    }

    /// True for categories that carry no employee rate.
    pub fn is_employer_only(&self) -> bool {
        matches!(self, InsuranceCategory::Injury | InsuranceCategory::Maternity)
    }
}

/// Which party pays a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSide {
    /// Withheld from the employee's pay.
    Employee,
    /// Paid by the employer on top of pay.
    Employer,
}

/// The contribution for one category on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContribution {
    /// The insurance category.
    pub category: InsuranceCategory,
    /// The rate applied to the contribution base.
    pub rate: Decimal,
    /// `base * rate`, unrounded.
    pub amount: Decimal,
}

/// All contributions paid by one side, computed from a clamped base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBreakdown {
    /// The paying side.
    pub side: ContributionSide,
    /// One entry per category, in [`InsuranceCategory::ALL`] order.
    pub contributions: Vec<CategoryContribution>,
    /// Sum of the statutory social insurance categories.
    pub social_insurance_total: Decimal,
    /// The housing fund contribution.
    pub housing_fund: Decimal,
}

impl SideBreakdown {
    /// Returns the amount for a category, or zero if it is absent.
    pub fn amount(&self, category: InsuranceCategory) -> Decimal {
        self.contributions
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Social insurance plus housing fund.
    pub fn total(&self) -> Decimal {
        self.social_insurance_total + self.housing_fund
    }

    /// Returns a copy with every amount rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            side: self.side,
            contributions: self
                .contributions
                .iter()
                .map(|c| CategoryContribution {
                    amount: round_currency(c.amount),
                    ..*c
                })
                .collect(),
            social_insurance_total: round_currency(self.social_insurance_total),
            housing_fund: round_currency(self.housing_fund),
        }
    }
}

/// The result of the social insurance calculator.
///
/// Both sides are computed from the same clamped contribution base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceBreakdown {
    /// The salary the calculation was asked for.
    pub salary: Decimal,
    /// The salary after clamping into the contribution base band.
    pub base: Decimal,
    /// Contributions withheld from the employee.
    pub employee: SideBreakdown,
    /// Contributions paid by the employer.
    pub employer: SideBreakdown,
}

impl InsuranceBreakdown {
    /// The employee's social insurance total (pension, medical, unemployment).
    pub fn employee_insurance_total(&self) -> Decimal {
        self.employee.social_insurance_total
    }

    /// The employee's housing fund contribution.
    pub fn housing_fund(&self) -> Decimal {
        self.employee.housing_fund
    }

    /// Returns a copy with every amount rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            salary: self.salary,
            base: self.base,
            employee: self.employee.rounded(),
            employer: self.employer.rounded(),
        }
    }
}
