//! Application State
//!
//! Shared state across all handlers and every call the worker takes.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use phone_agent_agent::{CallSession, SessionDeps};
use phone_agent_config::{ConfigStore, RuntimeConfig, Settings};
use phone_agent_core::CallControl;
use phone_agent_rag::{KnowledgeSearch, RetrievalClient};
use phone_agent_tools::ActionDeps;
use phone_agent_transport::{TelephonyService, TransferExecutor};

use crate::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<ConfigStore>,
    /// Routing profiles shared with call sessions
    pub telephony: Arc<TelephonyService>,
    /// Knowledge backend client shared by all calls
    pub search: Arc<dyn KnowledgeSearch>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<ConfigStore>) -> Result<Self, ServerError> {
        let search = RetrievalClient::from_settings(&settings.retrieval)
            .map_err(|e| ServerError::Retrieval(e.to_string()))?;

        let profiles = store
            .cached()
            .map(|config| config.telephony_profiles.clone())
            .unwrap_or_default();

        Ok(Self {
            settings: Arc::new(settings),
            store,
            telephony: Arc::new(TelephonyService::new(profiles)),
            search: Arc::new(search),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Reload the runtime config and hot-swap the routing profiles
    pub async fn reload_config(&self) -> Result<Arc<RuntimeConfig>, ServerError> {
        let config = self.store.load().await?;
        self.telephony
            .update_profiles(config.telephony_profiles.clone());
        Ok(config)
    }

    /// Collaborators for one call on `call`
    ///
    /// Transfers go through the SIP client built from the transfer settings.
    pub fn session_deps(&self, call: Arc<dyn CallControl>) -> SessionDeps {
        let transfer = TransferExecutor::sip(Arc::clone(&call), &self.settings.transfer);

        SessionDeps {
            search: Arc::clone(&self.search),
            actions: ActionDeps {
                call,
                telephony: Arc::clone(&self.telephony),
                transfer: Arc::new(transfer),
            },
        }
    }

    /// Set up a newly connected call and greet the caller
    ///
    /// Fails when the runtime config cannot be loaded; the call must not
    /// proceed without one.
    pub async fn start_call(&self, call: Arc<dyn CallControl>) -> Result<CallSession, ServerError> {
        let room = call.room_name();
        let session = CallSession::prepare(&self.store, self.session_deps(call)).await?;

        tracing::info!(room = %room, tools = ?session.tools().tool_names(), "Call started");
        session.greet().await?;
        Ok(session)
    }
}
