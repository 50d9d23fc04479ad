//! Call session assembly
//!
//! Everything a call needs, built from a single config snapshot: the
//! receptionist, the action registry and the refreshed routing profiles.

use std::sync::Arc;

use phone_agent_config::{ConfigStore, RuntimeConfig};
use phone_agent_rag::KnowledgeSearch;
use phone_agent_tools::{build_action_registry, ActionDeps, ToolRegistry};

use crate::receptionist::Receptionist;
use crate::AgentError;

/// Collaborators injected into a call session
#[derive(Clone)]
pub struct SessionDeps {
    pub search: Arc<dyn KnowledgeSearch>,
    pub actions: ActionDeps,
}

pub struct CallSession {
    config: Arc<RuntimeConfig>,
    agent: Receptionist,
    tools: ToolRegistry,
    deps: SessionDeps,
}

impl CallSession {
    /// Load a fresh snapshot and build the session from it
    pub async fn prepare(store: &ConfigStore, deps: SessionDeps) -> Result<Self, AgentError> {
        let config = store.load().await?;
        Ok(Self::from_snapshot(config, deps))
    }

    /// Build the session from an already loaded snapshot
    pub fn from_snapshot(config: Arc<RuntimeConfig>, deps: SessionDeps) -> Self {
        deps.actions
            .telephony
            .update_profiles(config.telephony_profiles.clone());

        let agent = Receptionist::new(Arc::clone(&config), Arc::clone(&deps.search));
        let tools = build_action_registry(&config, &deps.actions);

        tracing::info!(
            room = %deps.actions.call.room_name(),
            tools = tools.len(),
            "Call session prepared"
        );

        Self {
            config,
            agent,
            tools,
            deps,
        }
    }

    pub fn config(&self) -> &Arc<RuntimeConfig> {
        &self.config
    }

    pub fn agent(&self) -> &Receptionist {
        &self.agent
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Speak the opening greeting and wait for it to finish
    pub async fn greet(&self) -> Result<(), AgentError> {
        let call = &self.deps.actions.call;
        call.generate_reply(self.agent.greeting())
            .await
            .map_err(|e| AgentError::CallControl(e.to_string()))?;
        call.wait_for_playout()
            .await
            .map_err(|e| AgentError::CallControl(e.to_string()))
    }
}
