//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigHandle, JurisdictionConfig};

/// Shared application state.
///
/// Holds the active jurisdiction configuration. Each request takes one
/// snapshot and computes against it even if the configuration is replaced
/// mid-request.
#[derive(Clone)]
pub struct AppState {
    config: ConfigHandle,
}

impl AppState {
    /// Creates a new application state with the given configuration.
    pub fn new(config: JurisdictionConfig) -> Self {
        Self {
            config: ConfigHandle::new(config),
        }
    }

    /// Returns the current configuration snapshot.
    pub fn config(&self) -> Arc<JurisdictionConfig> {
        self.config.snapshot()
    }

    /// Replaces the active configuration for subsequent requests.
    pub fn replace_config(&self, config: JurisdictionConfig) -> Arc<JurisdictionConfig> {
        self.config.replace(config)
    }
}
