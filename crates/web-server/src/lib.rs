use axum::{
    routing::{get, post},
    Router,
};
use configuration::EngineConfig;
use engine::VerdictEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod contract;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub engine: Arc<VerdictEngine>,
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, config: EngineConfig) -> anyhow::Result<()> {
    // Note: tracing is initialized by the binary entry point, not here.
    let engine = Arc::new(VerdictEngine::new(config));
    let app_state = Arc::new(AppState { engine });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/analyze", post(handlers::post_analyze))
        .route("/api/verdict", post(handlers::post_verdict))
        .with_state(app_state)
        .layer(cors)
        // This middleware logs information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
