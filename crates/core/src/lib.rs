//! Core traits and types for the phone agent
//!
//! This crate provides foundational types used across all other crates:
//! - Error types
//! - Chat message types exchanged with the conversational engine
//! - The callable action (tool) interface
//! - The call-control surface supplied by the telephony session

pub mod conversation;
pub mod error;
pub mod traits;

pub use conversation::{ChatContext, ChatMessage, ChatRole};
pub use error::{Error, Result};

pub use traits::{
    // Call control
    CallControl,
    ContentBlock,
    ErrorCode,
    InputSchema,
    Participant,
    PropertySchema,
    // Tools
    Tool,
    ToolError,
    ToolOutput,
    ToolSchema,
};
