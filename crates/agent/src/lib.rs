//! Conversational Policy for the phone agent
//!
//! - Instruction assembly from the runtime config (scope-gated)
//! - Per-turn knowledge augmentation hook
//! - `Receptionist`: the behaviour object handed to the conversational engine
//! - `CallSession`: per-call assembly of agent, actions and routing profiles

pub mod augmentation;
pub mod instructions;
pub mod receptionist;
pub mod session;
pub mod traits;

pub use augmentation::{augment_turn, CONTEXT_PREFIX};
pub use instructions::{build_instructions, greeting_instructions};
pub use receptionist::Receptionist;
pub use session::{CallSession, SessionDeps};
pub use traits::ConversationalAgent;

use thiserror::Error;

use phone_agent_config::ConfigError;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Call control error: {0}")]
    CallControl(String),
}

impl From<AgentError> for phone_agent_core::Error {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Config(e) => e.into(),
            other => phone_agent_core::Error::Agent(other.to_string()),
        }
    }
}
