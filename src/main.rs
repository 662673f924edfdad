//! Concept Visualizer server binary.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concept_visualizer::adapters::{
    visualization_router, GeminiConfig, GeminiProvider, HttpPlanBackend, HttpPlanBackendConfig,
    InMemorySessionStore, VisualizationAppState,
};
use concept_visualizer::application::{GenerateVisualizationHandler, GenerationSettings};
use concept_visualizer::config::{AppConfig, ServerConfig, ValidationError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let api_key = config
        .ai
        .gemini_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("ai.gemini_api_key"))?;

    let ai_provider = GeminiProvider::new(
        GeminiConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let plan_backend = HttpPlanBackend::new(
        HttpPlanBackendConfig::new(&config.backend.base_url).with_timeout(config.backend.timeout()),
    )?;

    let generator = GenerateVisualizationHandler::new(Arc::new(plan_backend), Arc::new(ai_provider))
        .with_settings(GenerationSettings::from(&config.ai));

    let state = VisualizationAppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(generator),
    );

    let app = visualization_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        model = %config.ai.model,
        backend = %config.backend.base_url,
        "Concept visualizer listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact text otherwise. `RUST_LOG` overrides the
/// configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
