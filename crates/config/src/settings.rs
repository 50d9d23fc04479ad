//! Process settings
//!
//! Loaded once at startup. Everything here is about the process (where the
//! retrieval backend lives, SIP credentials, logging); nothing here varies per
//! call.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{endpoints, models, retrieval, transfer};
use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Admin HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Knowledge search backend
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// SIP transfer credentials and limits
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Speech/LLM model names handed to the external engine
    #[serde(default)]
    pub models: ModelConfig,

    /// Runtime config file (YAML/JSON overrides). Built-in defaults when unset.
    #[serde(default)]
    pub runtime_config_path: Option<String>,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Retrieval backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Embedding provider the backend should query with
    #[serde(default = "default_embedding_provider")]
    pub embedding_provider: String,

    /// Hits requested per search
    #[serde(default = "default_hits_k")]
    pub hits_k: usize,

    /// Per-request timeout
    #[serde(default = "default_retrieval_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_backend_url() -> String {
    endpoints::RETRIEVAL_BACKEND_DEFAULT.to_string()
}

fn default_embedding_provider() -> String {
    retrieval::DEFAULT_EMBEDDING_PROVIDER.to_string()
}

fn default_hits_k() -> usize {
    retrieval::DEFAULT_HITS_K
}

fn default_retrieval_timeout_ms() -> u64 {
    retrieval::DEFAULT_TIMEOUT_MS
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            embedding_provider: default_embedding_provider(),
            hits_k: default_hits_k(),
            timeout_ms: default_retrieval_timeout_ms(),
        }
    }
}

/// SIP transfer settings
///
/// Credentials are optional here; the transfer client refuses to build
/// without all three.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    #[serde(default)]
    pub sip_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Bound on waiting for a participant and on the transfer call itself
    #[serde(default = "default_transfer_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub play_dialtone: bool,
}

fn default_transfer_timeout_ms() -> u64 {
    transfer::DEFAULT_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            sip_url: None,
            api_key: None,
            api_secret: None,
            timeout_ms: default_transfer_timeout_ms(),
            play_dialtone: true,
        }
    }
}

/// Model names for the external speech/LLM engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
}

fn default_llm_model() -> String {
    models::DEFAULT_LLM_MODEL.to_string()
}

fn default_tts_model() -> String {
    models::DEFAULT_TTS_MODEL.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            llm_model: default_llm_model(),
            tts_model: default_tts_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_retrieval()?;
        self.validate_transfer()?;
        Ok(())
    }

    fn validate_retrieval(&self) -> Result<(), ConfigError> {
        let retrieval = &self.retrieval;

        if retrieval.backend_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.backend_url".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        if retrieval.hits_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.hits_k".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if retrieval.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.timeout_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    fn validate_transfer(&self) -> Result<(), ConfigError> {
        if self.transfer.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transfer.timeout_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults.
/// Environment variables use the PHONE_AGENT prefix and `__` as the nesting
/// separator, e.g. `PHONE_AGENT__RETRIEVAL__HITS_K=5`.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("PHONE_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
