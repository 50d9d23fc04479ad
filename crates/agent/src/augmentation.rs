//! Per-turn knowledge augmentation
//!
//! Runs after each completed caller utterance. Retrieval problems are logged
//! and swallowed; the turn always proceeds.

use phone_agent_config::RuntimeConfig;
use phone_agent_core::{ChatContext, ChatMessage};
use phone_agent_rag::KnowledgeSearch;

/// Prefix of the injected context message
pub const CONTEXT_PREFIX: &str = "Additional context (supplementary, ignore if irrelevant):\n\n";

/// Search the knowledge base for the utterance and inject the hits
///
/// Returns whether a context message was added.
pub async fn augment_turn(
    config: &RuntimeConfig,
    search: &dyn KnowledgeSearch,
    ctx: &mut ChatContext,
    message: &ChatMessage,
) -> bool {
    if !config.scopes.knowledge_base {
        tracing::debug!("Knowledge base scope disabled, skipping retrieval");
        return false;
    }

    let query = message.text().trim();
    if query.is_empty() {
        tracing::debug!("Empty utterance, skipping retrieval");
        return false;
    }

    let result = match search.search_default(query).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "Knowledge lookup failed, continuing without context");
            return false;
        },
    };

    let passages: Vec<&str> = result
        .hits
        .iter()
        .map(|hit| hit.text.trim())
        .filter(|text| !text.is_empty())
        .collect();

    if passages.is_empty() {
        tracing::debug!(query = %query, "No knowledge hits");
        return false;
    }

    tracing::info!(hits = passages.len(), "Injecting knowledge context");
    ctx.add_message(ChatMessage::system(format!(
        "{}{}",
        CONTEXT_PREFIX,
        passages.join("\n\n")
    )));
    true
}
