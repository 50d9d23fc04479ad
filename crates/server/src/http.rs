//! HTTP Endpoints
//!
//! Admin surface for the worker. Calls themselves arrive over the media
//! server, not through these routes.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use phone_agent_agent::{build_instructions, greeting_instructions};
use phone_agent_tools::ActionKind;
use phone_agent_transport::TransferTarget;

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/call/preview", get(call_preview))
        .route("/api/transfer/resolve", post(resolve_transfer))
        .route("/admin/reload-config", post(reload_config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "config_loaded": state.store.is_loaded(),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

#[derive(Debug, Serialize)]
struct CallPreview {
    instructions: String,
    greeting: String,
    tools: Vec<&'static str>,
}

/// What a call started now would be given
async fn call_preview(State(state): State<AppState>) -> Result<Json<CallPreview>, ServerError> {
    let config = state.store.cached()?;

    Ok(Json(CallPreview {
        instructions: build_instructions(&config),
        greeting: greeting_instructions(&config),
        tools: ActionKind::available(&config)
            .into_iter()
            .map(ActionKind::tool_name)
            .collect(),
    }))
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    address: Option<String>,
}

/// Dry-run a transfer resolution against the current profiles
async fn resolve_transfer(
    State(state): State<AppState>,
    Json(target): Json<TransferTarget>,
) -> Json<ResolveResponse> {
    Json(ResolveResponse {
        address: state.telephony.resolve(&target),
    })
}

/// POST /admin/reload-config
///
/// Reloads the runtime config and swaps routing profiles for later
/// resolutions. Calls already in progress keep their snapshot.
async fn reload_config(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let config = state.reload_config().await.map_err(|e| {
        tracing::error!("Config reload failed: {}", e);
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "profiles": config.telephony_profiles.len(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use phone_agent_config::{ConfigStore, Settings, StaticConfigProvider};

    fn state() -> AppState {
        let store = Arc::new(ConfigStore::new(Arc::new(StaticConfigProvider::new())));
        AppState::new(Settings::default(), store).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = create_router(state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["config_loaded"], false);
    }

    #[tokio::test]
    async fn test_preview_unavailable_before_load() {
        let response = create_router(state())
            .oneshot(
                Request::builder()
                    .uri("/api/call/preview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_reload_then_preview_and_resolve() {
        let state = state();
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/reload-config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["profiles"], 2);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/call/preview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let preview = body_json(response).await;
        assert!(preview["instructions"]
            .as_str()
            .unwrap()
            .contains("You represent The Company."));
        assert_eq!(preview["tools"].as_array().unwrap().len(), 5);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/transfer/resolve")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"department":"support"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["address"], "tel:312");
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = create_router(state())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
