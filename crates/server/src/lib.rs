//! Phone Agent Server
//!
//! Process wiring for the phone agent worker plus a small admin HTTP surface
//! for health, metrics, config reload and dry-run previews.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::init_metrics;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use phone_agent_agent::AgentError;
use phone_agent_config::ConfigError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Runtime configuration not loaded")]
    NotLoaded,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval client error: {0}")]
    Retrieval(String),

    #[error("Call setup failed: {0}")]
    Call(String),
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotLoaded => ServerError::NotLoaded,
            other => ServerError::Config(other.to_string()),
        }
    }
}

impl From<AgentError> for ServerError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Config(e) => e.into(),
            other => ServerError::Call(other.to_string()),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config(_) | ServerError::Retrieval(_) | ServerError::Call(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = StatusCode::from(self);
        (
            status,
            Json(serde_json::json!({"status": "error", "message": message})),
        )
            .into_response()
    }
}

impl From<ServerError> for phone_agent_core::Error {
    fn from(err: ServerError) -> Self {
        let message = err.to_string();
        match err {
            ServerError::NotLoaded | ServerError::Config(_) => {
                phone_agent_core::Error::Config(message)
            },
            ServerError::Retrieval(_) => phone_agent_core::Error::Rag(message),
            ServerError::Call(_) => phone_agent_core::Error::Agent(message),
        }
    }
}
