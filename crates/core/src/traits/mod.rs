//! Core traits for the phone agent
//!
//! # Trait Hierarchy
//!
//! ```text
//! Tools:
//!   - Tool: callable action exposed to the conversational engine
//!
//! Call control:
//!   - CallControl: the live call as seen by the agent (room, participant,
//!     speech output, teardown)
//! ```

mod call_control;
mod tool;

pub use call_control::{CallControl, Participant};
pub use tool::{
    ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
};
