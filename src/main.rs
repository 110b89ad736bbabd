use std::process;

use dotenvy::dotenv;
use tokio::signal;
use wordlink::{api, config::Config, db, logging, service::LinkService, state::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();
    let _guard = logging::init();

    let config = Config::load();

    // database config
    let store = match db::connect(&config.database_url, config.max_connections).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            process::exit(1);
        }
    };

    let state = AppState::new(LinkService::new(store.clone()), &config.public_dir);
    let app = api::router(state, config.request_timeout);

    let listener = match tokio::net::TcpListener::bind(&config.server_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.server_addr, "Failed to bind");
            process::exit(1);
        }
    };
    tracing::info!("Server running on {}", config.base_url);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    store.close().await;
    tracing::info!("Shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
