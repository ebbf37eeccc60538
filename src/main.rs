//! Application entry point: configuration, tracing, template cache, serving.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;

use bookings::{
    config::Config,
    error::Result,
    observability::init_tracing,
    render::{HelperRegistry, Renderer, TemplateStore},
    routes,
    session::create_memory_session_layer,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let store = TemplateStore::new(config.templates.root.clone(), HelperRegistry::standard());

    // Cached mode compiles everything before the first request, so a broken
    // template is fatal at launch rather than at first render.
    let renderer = if config.templates.use_cache {
        let cache = store.build_cache()?;
        tracing::info!(pages = cache.len(), "template cache built at startup");
        Renderer::cached(store, cache)
    } else {
        tracing::info!("template caching disabled, pages recompile per request");
        Renderer::live(store)
    };

    let session_layer = create_memory_session_layer(&config.session);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.service.port));
    let name = config.service.name.clone();

    let state = AppState::new(config, renderer);
    let app = routes::router(state, session_layer);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Starting {} on {}", name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
