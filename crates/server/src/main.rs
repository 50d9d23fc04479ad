//! Phone Agent Server Entry Point

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use phone_agent_config::{
    load_settings, ConfigProvider, ConfigStore, FileConfigProvider, Settings,
    StaticConfigProvider,
};
use phone_agent_server::{create_router, init_metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("PHONE_AGENT_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load settings: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing(&settings);

    tracing::info!("Starting Phone Agent v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = env.as_deref().unwrap_or("default"),
        retrieval = %settings.retrieval.backend_url,
        llm_model = %settings.models.llm_model,
        tts_model = %settings.models.tts_model,
        "Settings loaded"
    );

    let provider: Arc<dyn ConfigProvider> = match &settings.runtime_config_path {
        Some(path) => {
            tracing::info!(path = %path, "Using file runtime config provider");
            Arc::new(FileConfigProvider::new(path))
        },
        None => {
            tracing::info!("Using built-in runtime config");
            Arc::new(StaticConfigProvider::new())
        },
    };

    // A bad runtime config must stop the worker before it takes calls
    let store = Arc::new(ConfigStore::new(provider));
    store.load().await?;

    let mut state = AppState::new(settings.clone(), store)?;
    match init_metrics() {
        Ok(handle) => {
            tracing::info!("Initialized Prometheus metrics at /metrics");
            state = state.with_metrics(handle);
        },
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder unavailable"),
    }

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("phone_agent={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
