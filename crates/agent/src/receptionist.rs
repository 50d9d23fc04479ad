//! Receptionist agent
//!
//! Composed from the call's config snapshot and a knowledge search handle.
//! Instructions and greeting are computed once at construction.

use async_trait::async_trait;
use std::sync::Arc;

use phone_agent_config::RuntimeConfig;
use phone_agent_core::{ChatContext, ChatMessage};
use phone_agent_rag::KnowledgeSearch;

use crate::augmentation::augment_turn;
use crate::instructions::{build_instructions, greeting_instructions};
use crate::traits::ConversationalAgent;

pub struct Receptionist {
    config: Arc<RuntimeConfig>,
    search: Arc<dyn KnowledgeSearch>,
    instructions: String,
    greeting: String,
}

impl Receptionist {
    pub fn new(config: Arc<RuntimeConfig>, search: Arc<dyn KnowledgeSearch>) -> Self {
        let instructions = build_instructions(&config);
        let greeting = greeting_instructions(&config);
        Self {
            config,
            search,
            instructions,
            greeting,
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

#[async_trait]
impl ConversationalAgent for Receptionist {
    fn instructions(&self) -> &str {
        &self.instructions
    }

    async fn on_user_turn_completed(&self, ctx: &mut ChatContext, message: &ChatMessage) {
        augment_turn(&self.config, self.search.as_ref(), ctx, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phone_agent_rag::{RagError, SearchHit, SearchResult};

    struct OneHit;

    #[async_trait]
    impl KnowledgeSearch for OneHit {
        async fn search(&self, query: &str, _k: usize) -> Result<SearchResult, RagError> {
            Ok(SearchResult {
                query: query.to_string(),
                hits: vec![SearchHit {
                    score: 1.0,
                    text: "Returns are accepted for 30 days.".to_string(),
                    metadata: Default::default(),
                }],
                count: 1,
            })
        }

        fn default_k(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn test_receptionist_wires_instructions_and_hook() {
        let mut config = RuntimeConfig::defaults();
        config.company.company_name = "Acme".to_string();
        let agent = Receptionist::new(Arc::new(config), Arc::new(OneHit));

        assert!(agent.instructions().contains("You represent Acme."));
        assert_eq!(
            agent.greeting(),
            "Greet the caller on behalf of Acme and offer assistance."
        );

        let mut ctx = ChatContext::new();
        agent
            .on_user_turn_completed(&mut ctx, &ChatMessage::user("Can I return this?"))
            .await;
        assert!(ctx.last().unwrap().content.ends_with("Returns are accepted for 30 days."));
    }
}
