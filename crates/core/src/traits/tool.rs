//! Callable action interface
//!
//! Tools are what the conversational engine can invoke mid-call. Schemas are
//! JSON-Schema objects so they can be handed to any function-calling model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default timeout for tool execution
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Callable action
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name as exposed to the engine
    fn name(&self) -> &str;

    /// Human readable description used by the model to pick the tool
    fn description(&self) -> &str;

    /// Input schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;

    /// Validate input against the schema
    ///
    /// The default checks that the input is an object and every required
    /// property is present.
    fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let obj = input
            .as_object()
            .ok_or_else(|| ToolError::invalid_params("arguments must be a JSON object"))?;

        for required in &self.schema().input_schema.required {
            if !obj.contains_key(required) {
                return Err(ToolError::invalid_params(format!(
                    "{} is required",
                    required
                )));
            }
        }
        Ok(())
    }

    /// Execution timeout
    fn timeout_secs(&self) -> u64 {
        DEFAULT_TOOL_TIMEOUT_SECS
    }
}

/// Tool schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// JSON Schema for tool input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: serde_json::Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Empty object schema
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: serde_json::Map::new(),
            required: Vec::new(),
        }
    }

    /// Add a property
    pub fn property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema.into_value());
        if required {
            self.required.push(name.to_string());
        }
        self
    }
}

/// Single property schema
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    prop_type: &'static str,
    description: String,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            prop_type: "string",
            description: description.into(),
        }
    }

    fn into_value(self) -> Value {
        json!({
            "type": self.prop_type,
            "description": self.description,
        })
    }
}

/// Content block in a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolOutput {
    /// Plain text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Structured result, carried as serialized JSON text
    pub fn json(value: Value) -> Self {
        Self::text(value.to_string())
    }

    /// Concatenated text of all content blocks
    pub fn as_text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Tool error code (JSON-RPC numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidParams,
    MethodNotFound,
    InternalError,
    Timeout,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::InvalidParams => -32602,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InternalError => -32603,
            ErrorCode::Timeout => -32000,
        }
    }
}

/// Tool execution error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{}] {message}", .code.code())]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
}

impl ToolError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn timeout(tool: &str, secs: u64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Tool '{}' timed out after {}s", tool, secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the query"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object()
                    .property("query", PropertySchema::string("Text to echo"), true)
                    .property("tone", PropertySchema::string("Tone of voice"), false),
            }
        }

        async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::text(input["query"].as_str().unwrap_or_default()))
        }
    }

    #[test]
    fn test_schema_shape() {
        let schema = EchoTool.schema();
        assert_eq!(schema.input_schema.required, vec!["query".to_string()]);
        assert_eq!(schema.input_schema.properties["tone"]["type"], "string");
        assert_eq!(
            schema.input_schema.properties["tone"]["description"],
            "Tone of voice"
        );
    }

    #[test]
    fn test_default_validation() {
        assert!(EchoTool.validate(&json!({"query": "hi"})).is_ok());

        let err = EchoTool.validate(&json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);

        assert!(EchoTool.validate(&json!("not an object")).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ToolError::timeout("transfer_call", 45);
        assert_eq!(
            err.to_string(),
            "[-32000] Tool 'transfer_call' timed out after 45s"
        );
    }

    #[tokio::test]
    async fn test_execute_returns_text() {
        let out = EchoTool.execute(json!({"query": "hello"})).await.unwrap();
        assert_eq!(out.as_text(), "hello");
        assert!(!out.is_error);
    }
}
