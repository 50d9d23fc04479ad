//! Fixed-reply actions

use async_trait::async_trait;
use serde_json::Value;

use phone_agent_core::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

fn query_schema(name: &str, description: &str) -> ToolSchema {
    ToolSchema {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: InputSchema::object().property(
            "query",
            PropertySchema::string("The question from the user"),
            true,
        ),
    }
}

fn log_query(tool: &str, input: &Value) {
    let query = input.get("query").and_then(|v| v.as_str()).unwrap_or_default();
    tracing::debug!(tool, query = %query, "Tool executing");
}

pub struct FavoriteColorTool;

#[async_trait]
impl Tool for FavoriteColorTool {
    fn name(&self) -> &str {
        "favorite_color"
    }

    fn description(&self) -> &str {
        "Return the agent's favorite color when asked."
    }

    fn schema(&self) -> ToolSchema {
        query_schema(self.name(), self.description())
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        log_query(self.name(), &input);
        Ok(ToolOutput::text("Replies simply with the color green."))
    }
}

pub struct FavoriteCarTool;

#[async_trait]
impl Tool for FavoriteCarTool {
    fn name(&self) -> &str {
        "favorite_car"
    }

    fn description(&self) -> &str {
        "Return the agent's favorite car when asked."
    }

    fn schema(&self) -> ToolSchema {
        query_schema(self.name(), self.description())
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        log_query(self.name(), &input);
        Ok(ToolOutput::text("Replies simply with the car Mercedes."))
    }
}
