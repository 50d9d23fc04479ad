//! End-to-end call setup with in-memory collaborators
//!
//! Loads a config through the store, prepares a call session and drives the
//! turn hook and the transfer action the way the conversational engine would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use phone_agent_agent::{CallSession, ConversationalAgent, SessionDeps, CONTEXT_PREFIX};
use phone_agent_config::{
    CompanyOverrides, ConfigError, ConfigStore, Destination, RuntimeConfigOverrides,
    ScopeOverrides, StaticConfigProvider, TelephonyProfile,
};
use phone_agent_core::{CallControl, ChatContext, ChatMessage, Participant, Result as CoreResult};
use phone_agent_rag::{HitMetadata, KnowledgeSearch, RagError, SearchHit, SearchResult};
use phone_agent_tools::{ActionDeps, ToolExecutor, TRANSFER_FAILED_REPLY, TRANSFER_STARTED_REPLY};
use phone_agent_transport::{
    CallTransport, TelephonyService, TransferError, TransferExecutor, TransferOptions,
};

#[derive(Default)]
struct FakeCall {
    replies: Mutex<Vec<String>>,
}

#[async_trait]
impl CallControl for FakeCall {
    fn room_name(&self) -> String {
        "inbound-42".to_string()
    }

    fn participant_count(&self) -> usize {
        1
    }

    async fn wait_for_participant(&self) -> CoreResult<Participant> {
        Ok(Participant::new("sip_+15550001111"))
    }

    async fn generate_reply(&self, instructions: &str) -> CoreResult<()> {
        self.replies.lock().push(instructions.to_string());
        Ok(())
    }

    async fn wait_for_playout(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn switch_voice(&self, _language_code: &str, _voice: &str) -> CoreResult<()> {
        Ok(())
    }

    async fn delete_room(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn disconnect(&self) -> CoreResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct FakeTransport {
    transfers: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl CallTransport for FakeTransport {
    async fn transfer(
        &self,
        room: &str,
        participant: &str,
        address: &str,
        _options: TransferOptions,
    ) -> Result<(), TransferError> {
        self.transfers
            .lock()
            .push((room.to_string(), participant.to_string(), address.to_string()));
        Ok(())
    }
}

/// Returns one fixed hit and counts calls
#[derive(Default)]
struct FakeSearch {
    calls: AtomicUsize,
}

#[async_trait]
impl KnowledgeSearch for FakeSearch {
    async fn search(&self, query: &str, _k: usize) -> Result<SearchResult, RagError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SearchResult {
            query: query.to_string(),
            hits: vec![SearchHit {
                score: 0.9,
                text: "Support is open around the clock.".to_string(),
                metadata: HitMetadata::default(),
            }],
            count: 1,
        })
    }

    fn default_k(&self) -> usize {
        3
    }
}

struct Harness {
    call: Arc<FakeCall>,
    transport: Arc<FakeTransport>,
    search: Arc<FakeSearch>,
    telephony: Arc<TelephonyService>,
}

impl Harness {
    fn new() -> Self {
        Self {
            call: Arc::new(FakeCall::default()),
            transport: Arc::new(FakeTransport::default()),
            search: Arc::new(FakeSearch::default()),
            telephony: Arc::new(TelephonyService::new(Vec::new())),
        }
    }

    fn deps(&self) -> SessionDeps {
        let call: Arc<dyn CallControl> = self.call.clone();
        SessionDeps {
            search: self.search.clone(),
            actions: ActionDeps {
                call: Arc::clone(&call),
                telephony: Arc::clone(&self.telephony),
                transfer: Arc::new(TransferExecutor::new(call, self.transport.clone())),
            },
        }
    }
}

fn store(overrides: RuntimeConfigOverrides) -> ConfigStore {
    ConfigStore::new(Arc::new(StaticConfigProvider::with_overrides(overrides)))
}

fn acme() -> RuntimeConfigOverrides {
    RuntimeConfigOverrides {
        company: CompanyOverrides {
            company_name: Some("Acme".to_string()),
            company_description: Some("Industrial anvils and rockets.".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_session_instructions_and_greeting() {
    let harness = Harness::new();
    let session = CallSession::prepare(&store(acme()), harness.deps())
        .await
        .unwrap();

    assert!(session.agent().instructions().contains("You represent Acme."));

    session.greet().await.unwrap();
    assert_eq!(
        *harness.call.replies.lock(),
        vec!["Greet the caller on behalf of Acme and offer assistance.".to_string()]
    );
}

#[tokio::test]
async fn test_company_overview_off_hides_company() {
    let mut overrides = acme();
    overrides.scopes = ScopeOverrides {
        company_overview: Some(false),
        ..Default::default()
    };

    let harness = Harness::new();
    let session = CallSession::prepare(&store(overrides), harness.deps())
        .await
        .unwrap();

    let instructions = session.agent().instructions();
    assert!(!instructions.contains("Acme"));
    assert!(!instructions.contains("Industrial anvils"));
    assert_eq!(
        session.agent().greeting(),
        "Greet the caller and offer assistance."
    );
}

#[tokio::test]
async fn test_no_destinations_means_no_transfer_anywhere() {
    let overrides = RuntimeConfigOverrides {
        telephony_profiles: Some(vec![TelephonyProfile {
            label: "Silent".to_string(),
            e164: "+12025550100".to_string(),
            transfer_preference: Default::default(),
            transfer_methods: vec!["pstn".to_string()],
            destinations: vec![Destination {
                description: Some("Nobody home".to_string()),
                ..Default::default()
            }],
        }]),
        ..Default::default()
    };

    let harness = Harness::new();
    let session = CallSession::prepare(&store(overrides), harness.deps())
        .await
        .unwrap();

    assert!(!session.tools().has("transfer_call"));
    assert!(session
        .agent()
        .instructions()
        .contains("Call transfers are not available."));
}

#[tokio::test]
async fn test_turn_hook_respects_knowledge_scope() {
    let harness = Harness::new();
    let session = CallSession::prepare(&store(acme()), harness.deps())
        .await
        .unwrap();

    let mut ctx = ChatContext::new();
    session
        .agent()
        .on_user_turn_completed(&mut ctx, &ChatMessage::user("Is support open at night?"))
        .await;
    assert_eq!(
        ctx.last().unwrap().content,
        format!("{}Support is open around the clock.", CONTEXT_PREFIX)
    );

    let mut disabled = acme();
    disabled.scopes.knowledge_base = Some(false);
    let harness = Harness::new();
    let session = CallSession::prepare(&store(disabled), harness.deps())
        .await
        .unwrap();

    let mut ctx = ChatContext::new();
    session
        .agent()
        .on_user_turn_completed(&mut ctx, &ChatMessage::user("Is support open at night?"))
        .await;
    assert!(ctx.is_empty());
    assert_eq!(harness.search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transfer_action_uses_session_profiles() {
    let overrides = RuntimeConfigOverrides {
        telephony_profiles: Some(vec![TelephonyProfile {
            label: "Main".to_string(),
            e164: "+12025550100".to_string(),
            transfer_preference: Default::default(),
            transfer_methods: vec!["sip".to_string()],
            destinations: vec![Destination {
                number: Some("365".to_string()),
                department: Some("Sales".to_string()),
                ..Default::default()
            }],
        }]),
        ..Default::default()
    };

    let harness = Harness::new();
    let session = CallSession::prepare(&store(overrides), harness.deps())
        .await
        .unwrap();

    // the session refreshed the shared service's profiles
    assert_eq!(harness.telephony.profiles().len(), 1);

    let output = session
        .tools()
        .execute("transfer_call", json!({"department": "sales"}))
        .await
        .unwrap();

    assert_eq!(output.as_text(), TRANSFER_STARTED_REPLY);
    assert_eq!(
        *harness.transport.transfers.lock(),
        vec![(
            "inbound-42".to_string(),
            "sip_+15550001111".to_string(),
            "tel:365".to_string()
        )]
    );
}

#[tokio::test]
async fn test_unresolvable_transfer_keeps_call_alive() {
    let overrides = RuntimeConfigOverrides {
        telephony_profiles: Some(vec![TelephonyProfile {
            label: "Queue".to_string(),
            e164: "+12025550100".to_string(),
            transfer_preference: Default::default(),
            transfer_methods: Vec::new(),
            destinations: vec![Destination {
                department: Some("Billing".to_string()),
                ..Default::default()
            }],
        }]),
        ..Default::default()
    };

    let harness = Harness::new();
    let session = CallSession::prepare(&store(overrides), harness.deps())
        .await
        .unwrap();

    let output = session
        .tools()
        .execute("transfer_call", json!({"department": "billing"}))
        .await
        .unwrap();

    assert_eq!(output.as_text(), TRANSFER_FAILED_REPLY);
    assert!(harness.transport.transfers.lock().is_empty());
}

#[tokio::test]
async fn test_cached_before_load_is_not_loaded() {
    let store = store(RuntimeConfigOverrides::default());
    assert!(matches!(store.cached(), Err(ConfigError::NotLoaded)));

    let harness = Harness::new();
    CallSession::prepare(&store, harness.deps()).await.unwrap();
    assert!(store.cached().is_ok());
}
