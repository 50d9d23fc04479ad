//! Call actions
//!
//! The action set is closed. Every action is always offered except call
//! transfer, which needs at least one addressable destination.

mod end_call;
mod language;
mod static_replies;
mod transfer;

pub use end_call::EndCallTool;
pub use language::{language_settings, ChangeLanguageTool, LanguageSettings};
pub use static_replies::{FavoriteCarTool, FavoriteColorTool};
pub use transfer::{TransferCallTool, TRANSFER_FAILED_REPLY, TRANSFER_STARTED_REPLY};

use std::sync::Arc;

use phone_agent_config::RuntimeConfig;
use phone_agent_core::CallControl;
use phone_agent_transport::{TelephonyService, TransferExecutor};

use crate::registry::ToolRegistry;

/// Every action the engine may be offered, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    FavoriteColor,
    FavoriteCar,
    ChangeLanguage,
    EndCall,
    TransferCall,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::FavoriteColor,
        ActionKind::FavoriteCar,
        ActionKind::ChangeLanguage,
        ActionKind::EndCall,
        ActionKind::TransferCall,
    ];

    /// Name the engine invokes the action by
    pub fn tool_name(self) -> &'static str {
        match self {
            ActionKind::FavoriteColor => "favorite_color",
            ActionKind::FavoriteCar => "favorite_car",
            ActionKind::ChangeLanguage => "change_language",
            ActionKind::EndCall => "end_call",
            ActionKind::TransferCall => "transfer_call",
        }
    }

    /// Whether the action is offered for this configuration
    pub fn is_available(self, config: &RuntimeConfig) -> bool {
        match self {
            ActionKind::TransferCall => config.has_transfer_destinations(),
            _ => true,
        }
    }

    /// Actions offered for this configuration
    pub fn available(config: &RuntimeConfig) -> Vec<ActionKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_available(config))
            .collect()
    }
}

/// Live collaborators the actions act on
#[derive(Clone)]
pub struct ActionDeps {
    pub call: Arc<dyn CallControl>,
    pub telephony: Arc<TelephonyService>,
    pub transfer: Arc<TransferExecutor>,
}

/// Build the registry of actions offered for `config`
pub fn build_action_registry(config: &RuntimeConfig, deps: &ActionDeps) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    for kind in ActionKind::available(config) {
        match kind {
            ActionKind::FavoriteColor => registry.register(FavoriteColorTool),
            ActionKind::FavoriteCar => registry.register(FavoriteCarTool),
            ActionKind::ChangeLanguage => {
                registry.register(ChangeLanguageTool::new(Arc::clone(&deps.call)))
            },
            ActionKind::EndCall => registry.register(EndCallTool::new(Arc::clone(&deps.call))),
            ActionKind::TransferCall => registry.register(TransferCallTool::new(
                Arc::clone(&deps.telephony),
                Arc::clone(&deps.transfer),
            )),
        }
    }

    tracing::info!(
        tools = ?registry.tool_names(),
        "Built action registry"
    );

    registry
}
