//! Action Registry for the phone agent
//!
//! Callable actions exposed to the conversational engine, and the registry
//! that executes them by name with argument validation and per-tool
//! timeouts. Which actions a call gets is decided once, from the runtime
//! configuration, by `build_action_registry`.

pub mod actions;
pub mod registry;

pub use actions::{
    build_action_registry, language_settings, ActionDeps, ActionKind, ChangeLanguageTool,
    EndCallTool, FavoriteCarTool, FavoriteColorTool, LanguageSettings, TransferCallTool,
    TRANSFER_FAILED_REPLY, TRANSFER_STARTED_REPLY,
};
pub use registry::{ToolExecutor, ToolRegistry};
