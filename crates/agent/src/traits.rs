//! Agent traits for abstraction and testability

use async_trait::async_trait;

use phone_agent_core::{ChatContext, ChatMessage};

/// Capabilities the conversational engine needs from the agent
///
/// The engine reads `instructions` once when the session starts and calls
/// `on_user_turn_completed` after every caller utterance, before it asks for
/// the reply to that utterance.
#[async_trait]
pub trait ConversationalAgent: Send + Sync {
    /// System instructions for the whole call
    fn instructions(&self) -> &str;

    /// Hook run once per completed caller utterance
    ///
    /// May add messages to `ctx`. Must not fail the turn.
    async fn on_user_turn_completed(&self, ctx: &mut ChatContext, message: &ChatMessage);
}
