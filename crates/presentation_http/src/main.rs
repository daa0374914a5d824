//! LearnGate HTTP Server
//!
//! Main entry point for the gateway.

use infrastructure::{AppConfig, ProviderResolver, build_http_client, init_tracing};
use presentation_http::{
    ReloadableConfig, RequestIdLayer, ShutdownOutcome, routes, serve_with_shutdown,
    spawn_capability_watcher, spawn_config_reload_handler, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; tracing is configured from it, so errors are
    // reported once the subscriber is up
    let (initial_config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(initial_config.server.log_format)?;

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!("LearnGate v{} starting...", env!("CARGO_PKG_VERSION"));

    let capabilities = ProviderResolver::new(&initial_config).capabilities();
    info!(
        host = %initial_config.server.host,
        port = %initial_config.server.port,
        chat_provider = %initial_config.providers.chat,
        ?capabilities,
        "Configuration loaded"
    );

    // Create reloadable config and spawn SIGHUP handler
    let reloadable_config =
        spawn_config_reload_handler(ReloadableConfig::new(initial_config.clone()));
    spawn_capability_watcher(&reloadable_config);

    let http_client = build_http_client()?;
    let state = AppState::new(reloadable_config, http_client);

    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if initial_config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = initial_config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };

    // Add middleware (order matters: last added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestIdLayer::new());

    let addr = format!(
        "{}:{}",
        initial_config.server.host, initial_config.server.port
    );
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("SIGHUP for config reload is enabled (Unix only)");

    let outcome = serve_with_shutdown(
        listener,
        app,
        shutdown_signal(),
        initial_config.shutdown_timeout(),
    )
    .await?;

    if outcome == ShutdownOutcome::Graceful {
        info!("Server shutdown complete");
    } else {
        warn!("Server shutdown forced after timeout");
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
