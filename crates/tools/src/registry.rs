//! Tool Registry
//!
//! Holds the actions exposed to the conversational engine and executes them
//! by name. Registration order is kept; the engine sees tools in that order.

use async_trait::async_trait;
use serde_json::Value;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;

use phone_agent_core::{Tool, ToolError, ToolOutput, ToolSchema};

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool
    ///
    /// Registering a name twice replaces the earlier tool in place.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Validate the arguments, then run the tool under its own timeout
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;

        tool.validate(&arguments)?;

        let timeout_secs = tool.timeout_secs();
        tracing::trace!(tool = name, timeout_secs, "Executing tool with timeout");

        match tokio::time::timeout(Duration::from_secs(timeout_secs), tool.execute(arguments))
            .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)),
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.get(name).map(|t| t.schema())
    }
}
