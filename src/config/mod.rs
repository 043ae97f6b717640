//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load a jurisdiction's insurance
//! rates, contribution base band, tax schedule and payroll policy from YAML
//! files, and a [`ConfigHandle`] for swapping the active configuration at
//! runtime.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/beijing_2024").unwrap();
//! println!("Loaded jurisdiction: {}", config.metadata().name);
//! ```

mod handle;
mod loader;
mod types;

pub use handle::ConfigHandle;
pub use loader::ConfigLoader;
pub use types::{
    ContributionBaseBand, InsuranceRateTable, InsuranceScheme, JurisdictionConfig,
    JurisdictionMetadata, PayrollPolicy, RatePair, TaxBracket, TaxSchedule,
};
