//! Runtime configuration providers
//!
//! A provider produces a complete `RuntimeConfig`. Merging defaults with
//! overrides is the provider's job; the store only caches what it gets.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::overrides::RuntimeConfigOverrides;
use crate::runtime::RuntimeConfig;
use crate::ConfigError;

/// Source of runtime configuration
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn load_config(&self) -> Result<RuntimeConfig, ConfigError>;
}

/// Built-in defaults with optional in-code overrides
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    overrides: RuntimeConfigOverrides,
}

impl StaticConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: RuntimeConfigOverrides) -> Self {
        Self { overrides }
    }
}

#[async_trait]
impl ConfigProvider for StaticConfigProvider {
    async fn load_config(&self) -> Result<RuntimeConfig, ConfigError> {
        Ok(RuntimeConfig::from_overrides(self.overrides.clone()))
    }
}

/// Overrides read from a YAML or JSON file on every load
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_overrides(&self) -> Result<RuntimeConfigOverrides, ConfigError> {
        let display = self.path.display().to_string();

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::FileNotFound(display.clone()),
                _ => ConfigError::ParseError(format!("{}: {}", display, e)),
            })?;

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", display, e))),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", display, e))),
            _ => Err(ConfigError::ParseError(format!(
                "{}: unsupported format (expected .yaml, .yml or .json)",
                display
            ))),
        }
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn load_config(&self) -> Result<RuntimeConfig, ConfigError> {
        let overrides = self.read_overrides().await?;
        tracing::debug!(path = %self.path.display(), "Loaded runtime config overrides");
        Ok(RuntimeConfig::from_overrides(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::overrides::CompanyOverrides;

    #[tokio::test]
    async fn test_static_provider_applies_overrides() {
        let provider = StaticConfigProvider::with_overrides(RuntimeConfigOverrides {
            company: CompanyOverrides {
                company_name: Some("Acme".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });

        let config = provider.load_config().await.unwrap();
        assert_eq!(config.company.company_name, "Acme");
        assert_eq!(config.identity.agent_name, "Receptionist");
    }

    #[tokio::test]
    async fn test_file_provider_reads_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "identity:\n  agentName: Ava\ntelephonyProfiles:\n  - label: Only\n    e164: \"+15550000000\"\n    destinations:\n      - number: \"100\"\n"
        )
        .unwrap();

        let provider = FileConfigProvider::new(file.path());
        let config = provider.load_config().await.unwrap();
        assert_eq!(config.identity.agent_name, "Ava");
        assert_eq!(config.telephony_profiles.len(), 1);
        assert_eq!(config.telephony_profiles[0].destinations[0].number.as_deref(), Some("100"));
    }

    #[tokio::test]
    async fn test_file_provider_reads_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"scopes": {{"knowledgeBase": false}}}}"#).unwrap();

        let config = FileConfigProvider::new(file.path()).load_config().await.unwrap();
        assert!(!config.scopes.knowledge_base);
    }

    #[tokio::test]
    async fn test_file_provider_errors() {
        let missing = FileConfigProvider::new("/definitely/not/here.yaml");
        assert!(matches!(
            missing.load_config().await,
            Err(ConfigError::FileNotFound(_))
        ));

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "x = 1").unwrap();
        assert!(matches!(
            FileConfigProvider::new(file.path()).load_config().await,
            Err(ConfigError::ParseError(_))
        ));

        let mut bad = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(bad, "{{ not json").unwrap();
        assert!(matches!(
            FileConfigProvider::new(bad.path()).load_config().await,
            Err(ConfigError::ParseError(_))
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_file_provider_rereads_on_each_load() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        std::fs::write(file.path(), "identity:\n  agentName: Ava\n").unwrap();

        let provider = FileConfigProvider::new(file.path());
        assert_eq!(provider.load_config().await.unwrap().identity.agent_name, "Ava");

        std::fs::write(file.path(), "identity:\n  agentName: Bea\n").unwrap();
        assert_eq!(provider.load_config().await.unwrap().identity.agent_name, "Bea");
    }
}
