//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a
//! jurisdiction's payroll configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    InsuranceScheme, JurisdictionConfig, JurisdictionMetadata, PayrollPolicy, TaxBracketsFile,
    TaxSchedule,
};

/// Loads a validated [`JurisdictionConfig`] from a directory.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/beijing_2024/
/// ├── jurisdiction.yaml   # Code, name, effective date, source
/// ├── insurance.yaml      # Contribution base band and rates per category
/// ├── tax_brackets.yaml   # Ordered progressive tax brackets
/// └── policy.yaml         # Days per month, overtime multiplier, personal deduction
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/beijing_2024")?;
/// println!("Tax brackets: {}", config.tax().brackets().len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/beijing_2024")
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - A table violates one of its invariants (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<JurisdictionConfig> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let insurance = Self::load_yaml::<InsuranceScheme>(&path.join("insurance.yaml"))?;
        let brackets = Self::load_yaml::<TaxBracketsFile>(&path.join("tax_brackets.yaml"))?;
        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;

        let tax = TaxSchedule::new(brackets.brackets)?;
        let config = JurisdictionConfig::new(metadata, insurance, tax, policy)?;

        debug!(
            jurisdiction = %config.metadata().code,
            effective_date = %config.metadata().effective_date,
            brackets = config.tax().brackets().len(),
            "Loaded payroll configuration"
        );

        Ok(config)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
