//! Language switch

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use phone_agent_config::constants::voice;
use phone_agent_core::{
    CallControl, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
};

/// Speech settings for a spoken language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSettings {
    pub code: &'static str,
    pub voice: &'static str,
}

const ENGLISH: LanguageSettings = LanguageSettings {
    code: "en",
    voice: voice::DEFAULT_VOICE_ID,
};

/// Settings for a language name; unknown names fall back to English
pub fn language_settings(language: &str) -> LanguageSettings {
    match language.trim().to_lowercase().as_str() {
        "italian" => LanguageSettings {
            code: "it",
            voice: voice::ITALIAN_VOICE_ID,
        },
        "spanish" => LanguageSettings {
            code: "es",
            voice: voice::SPANISH_VOICE_ID,
        },
        _ => ENGLISH,
    }
}

pub struct ChangeLanguageTool {
    call: Arc<dyn CallControl>,
}

impl ChangeLanguageTool {
    pub fn new(call: Arc<dyn CallControl>) -> Self {
        Self { call }
    }
}

#[async_trait]
impl Tool for ChangeLanguageTool {
    fn name(&self) -> &str {
        "change_language"
    }

    fn description(&self) -> &str {
        "Change the language you are speaking in to the specified language. Use this when the user requests to speak in a different language, e.g., \"Can we speak in Italian?\". After this, use the new language for every interaction."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "language",
                PropertySchema::string(
                    "The target language to switch to (e.g., \"Italian\", \"English\")",
                ),
                true,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let language = input
            .get("language")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::invalid_params("language is required"))?;

        let settings = language_settings(language);
        tracing::info!(language = %language, code = settings.code, "Changing language");

        self.call
            .switch_voice(settings.code, settings.voice)
            .await
            .map_err(|e| ToolError::internal(e.to_string()))?;

        Ok(ToolOutput::text(format!("Switching to {} now.", language)))
    }

    fn timeout_secs(&self) -> u64 {
        10
    }
}
