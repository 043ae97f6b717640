//! Swappable configuration snapshots.

use std::sync::{Arc, PoisonError, RwLock};

use super::JurisdictionConfig;

/// Holds the active [`JurisdictionConfig`] as an immutable snapshot.
///
/// Readers take an `Arc` to the current snapshot and compute against it for
/// as long as they need; [`ConfigHandle::replace`] installs a new snapshot
/// without touching the one in-flight calls are using.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    current: Arc<RwLock<Arc<JurisdictionConfig>>>,
}

impl ConfigHandle {
    /// Creates a handle holding `config`.
    pub fn new(config: JurisdictionConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<JurisdictionConfig> {
        // The lock only guards an Arc swap, so a poisoned lock still holds a
        // complete snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs `config` as the current snapshot and returns the previous one.
    pub fn replace(&self, config: JurisdictionConfig) -> Arc<JurisdictionConfig> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use rust_decimal::Decimal;

    fn load() -> JurisdictionConfig {
        ConfigLoader::load("./config/beijing_2024").unwrap()
    }

    #[test]
    fn test_snapshot_returns_loaded_config() {
        let handle = ConfigHandle::new(load());
        assert_eq!(handle.snapshot().metadata().code, "CN-BJ");
    }

    #[test]
    fn test_replace_leaves_existing_snapshot_untouched() {
        let handle = ConfigHandle::new(load());
        let before = handle.snapshot();

        let mut policy = *before.policy();
        policy.personal_deduction = Decimal::from(6000);
        let updated = JurisdictionConfig::new(
            before.metadata().clone(),
            *before.insurance(),
            before.tax().clone(),
            policy,
        )
        .unwrap();

        let previous = handle.replace(updated);

        assert_eq!(before.policy().personal_deduction, Decimal::from(5000));
        assert_eq!(previous.policy().personal_deduction, Decimal::from(5000));
        assert_eq!(
            handle.snapshot().policy().personal_deduction,
            Decimal::from(6000)
        );
    }

    #[test]
    fn test_clones_share_the_same_slot() {
        let handle = ConfigHandle::new(load());
        let clone = handle.clone();

        let mut policy = *handle.snapshot().policy();
        policy.overtime_multiplier = Decimal::from(2);
        let current = handle.snapshot();
        clone.replace(
            JurisdictionConfig::new(
                current.metadata().clone(),
                *current.insurance(),
                current.tax().clone(),
                policy,
            )
            .unwrap(),
        );

        assert_eq!(
            handle.snapshot().policy().overtime_multiplier,
            Decimal::from(2)
        );
    }
}
