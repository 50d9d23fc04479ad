//! Configuration Store
//!
//! Holds the runtime config snapshot for the current call. The snapshot is
//! replaced only by `load`; readers get an `Arc` to an immutable value, so a
//! component that read the snapshot keeps a consistent view even if a later
//! load swaps it.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::provider::ConfigProvider;
use crate::runtime::RuntimeConfig;
use crate::ConfigError;

#[derive(Debug, Clone)]
enum ConfigState {
    Unloaded,
    Loaded(Arc<RuntimeConfig>),
}

/// Runtime config cache backed by a provider
pub struct ConfigStore {
    provider: Arc<dyn ConfigProvider>,
    state: RwLock<ConfigState>,
}

impl ConfigStore {
    pub fn new(provider: Arc<dyn ConfigProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(ConfigState::Unloaded),
        }
    }

    /// Fetch a fresh snapshot from the provider and cache it
    ///
    /// On failure the previously cached snapshot (if any) is kept.
    pub async fn load(&self) -> Result<Arc<RuntimeConfig>, ConfigError> {
        let config = Arc::new(self.provider.load_config().await?);
        *self.state.write() = ConfigState::Loaded(Arc::clone(&config));

        tracing::info!(
            company = %config.company.company_name,
            profiles = config.telephony_profiles.len(),
            knowledge_base = config.scopes.knowledge_base,
            "Runtime configuration loaded"
        );

        Ok(config)
    }

    /// Last loaded snapshot
    pub fn cached(&self) -> Result<Arc<RuntimeConfig>, ConfigError> {
        match &*self.state.read() {
            ConfigState::Loaded(config) => Ok(Arc::clone(config)),
            ConfigState::Unloaded => Err(ConfigError::NotLoaded),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(&*self.state.read(), ConfigState::Loaded(_))
    }
}
