//! Application startup and server initialization.
//!
//! Builds the auth chain, item store and presigner from configuration,
//! wires them into the router and serves until a shutdown signal arrives.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::attachments::create_presigner;
use crate::auth::Auth;
use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Builds the shared state from configuration.
///
/// # Errors
///
/// Returns an error if the configured store backend cannot be reached.
pub async fn build_state(config: Arc<ConfigV1>) -> Result<AppState, String> {
    let store = create_store(&config.store).await?;
    let auth = Arc::new(Auth::new(&config.providers, config.auth.clone()));
    let presigner = create_presigner(&config.attachments);

    Ok(AppState {
        config,
        auth,
        store,
        presigner,
    })
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the store cannot be created, the server fails to bind
/// to the configured address, or serving fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone()).await?;
    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
