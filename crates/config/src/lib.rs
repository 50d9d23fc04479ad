//! Configuration management for the phone agent
//!
//! Two kinds of configuration live here:
//! - `RuntimeConfig`: the per-call snapshot describing the company, its
//!   knowledge scopes and transfer routing. Supplied by a `ConfigProvider`
//!   and held by the `ConfigStore` for the lifetime of a call.
//! - `Settings`: process-level settings (retrieval backend, SIP credentials,
//!   logging) loaded from files and environment variables (PHONE_AGENT_ prefix).

pub mod constants;
pub mod overrides;
pub mod provider;
pub mod runtime;
pub mod settings;
pub mod store;

pub use overrides::{
    CompanyOverrides, IdentityOverrides, RuntimeConfigOverrides, SafetyOverrides, ScopeOverrides,
};
pub use provider::{ConfigProvider, FileConfigProvider, StaticConfigProvider};
pub use runtime::{
    AgentIdentity, BusinessHours, CompanyProfile, Destination, KnowledgeScopes, Location,
    RuntimeConfig, SafetyLimits, TelephonyProfile, TransferPreference,
};
pub use settings::{
    load_settings, ModelConfig, ObservabilityConfig, RetrievalConfig, ServerConfig, Settings,
    TransferConfig,
};
pub use store::ConfigStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Configuration provider failed: {0}")]
    Provider(String),

    #[error("Runtime configuration has not been loaded yet")]
    NotLoaded,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for phone_agent_core::Error {
    fn from(err: ConfigError) -> Self {
        phone_agent_core::Error::Config(err.to_string())
    }
}
