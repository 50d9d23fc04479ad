//! Call termination

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use phone_agent_core::{
    CallControl, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
};

const GOODBYE_INSTRUCTIONS: &str = "Say goodbye to the user and end the call.";

/// Says goodbye, waits for the speech to finish, then tears the room down
pub struct EndCallTool {
    call: Arc<dyn CallControl>,
}

impl EndCallTool {
    pub fn new(call: Arc<dyn CallControl>) -> Self {
        Self { call }
    }
}

#[async_trait]
impl Tool for EndCallTool {
    fn name(&self) -> &str {
        "end_call"
    }

    fn description(&self) -> &str {
        "End the phone call when the conversation has naturally concluded. Use this when the user says goodbye, indicates they are done, or the conversation has reached its natural end."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "reason",
                PropertySchema::string(
                    "Brief reason why the call is ending (e.g., \"User said goodbye\", \"Task completed\")",
                ),
                true,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let reason = input
            .get("reason")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::invalid_params("reason is required"))?;

        let room = self.call.room_name();
        tracing::info!(
            room = %room,
            participants = self.call.participant_count(),
            reason = %reason,
            "Ending call"
        );

        self.call
            .generate_reply(GOODBYE_INSTRUCTIONS)
            .await
            .map_err(|e| ToolError::internal(e.to_string()))?;
        self.call
            .wait_for_playout()
            .await
            .map_err(|e| ToolError::internal(e.to_string()))?;

        if let Err(e) = self.call.delete_room().await {
            tracing::error!(room = %room, error = %e, "Failed to delete room, disconnecting");
            self.call
                .disconnect()
                .await
                .map_err(|e| ToolError::internal(e.to_string()))?;
        }

        Ok(ToolOutput::json(json!({
            "success": true,
            "reason": reason,
            "message": "Call ended successfully",
            "ended_at": Utc::now().to_rfc3339(),
        })))
    }
}
