//! Human transfer
//!
//! Never fails towards the engine: every transfer problem becomes a spoken
//! apology and the call continues.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use phone_agent_core::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};
use phone_agent_transport::{TelephonyService, TransferExecutor, TransferTarget};

pub const TRANSFER_STARTED_REPLY: &str = "Transferring you now. Goodbye!";
pub const TRANSFER_FAILED_REPLY: &str =
    "I was unable to transfer your call. Let me try to assist you instead.";

/// Slack on top of the two executor stages before the registry gives up
const TIMEOUT_MARGIN_SECS: u64 = 15;

pub struct TransferCallTool {
    telephony: Arc<TelephonyService>,
    executor: Arc<TransferExecutor>,
}

impl TransferCallTool {
    pub fn new(telephony: Arc<TelephonyService>, executor: Arc<TransferExecutor>) -> Self {
        Self {
            telephony,
            executor,
        }
    }
}

#[async_trait]
impl Tool for TransferCallTool {
    fn name(&self) -> &str {
        "transfer_call"
    }

    fn description(&self) -> &str {
        "Transfer the call to a human agent. Use this when the user requests to speak to a human."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "number",
                    PropertySchema::string(
                        "The number to transfer the call to (e.g. \"365\", \"312\").",
                    ),
                    false,
                )
                .property(
                    "name",
                    PropertySchema::string(
                        "The name of the person to transfer the call to (e.g. \"Mark\", \"Luke\").",
                    ),
                    false,
                )
                .property(
                    "department",
                    PropertySchema::string(
                        "The department to transfer the call to (e.g. \"sales\", \"support\").",
                    ),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let target: TransferTarget = serde_json::from_value(input)
            .map_err(|e| ToolError::invalid_params(e.to_string()))?;

        tracing::info!(?target, "Attempting transfer");

        let reply = match self.telephony.transfer(&target, &self.executor).await {
            Ok(_) => TRANSFER_STARTED_REPLY,
            Err(e) => {
                tracing::warn!(error = %e, "Transfer failed, continuing the call");
                TRANSFER_FAILED_REPLY
            },
        };

        Ok(ToolOutput::text(reply))
    }

    /// Outlasts the participant wait plus the transfer RPC, so a slow
    /// transfer still ends in the spoken apology
    fn timeout_secs(&self) -> u64 {
        let stages = self.executor.timeout() * 2;
        stages.as_secs() + u64::from(stages.subsec_nanos() > 0) + TIMEOUT_MARGIN_SECS
    }
}
