//! # sigboxd — sigbox daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Open the `SQLite` database and make sure the record table exists
//! - Construct the record store (adapter) and inject it into the service
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the database
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::future::Future;
use std::time::Duration;

use axum::Router;
use sigbox_adapter_http_axum::router;
use sigbox_adapter_http_axum::state::AppState;
use sigbox_adapter_storage_sqlite_sqlx::{Database, SqliteRecordStore};
use sigbox_app::services::record_service::RecordService;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let db = sigbox_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;

    let served = serve(&config, &db).await;
    db.close().await;
    served?;

    tracing::info!("sigboxd stopped");
    Ok(())
}

/// Serve HTTP until a shutdown signal arrives.
///
/// The database stays owned by the caller so it is closed on every exit path.
async fn serve(config: &Config, db: &Database) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "sigboxd listening");
    tracing::info!("operator callbacks expected at http://{addr}/sigfox/callback");

    run(listener, app(db), shutdown_signal(), config.shutdown_grace()).await
}

fn app(db: &Database) -> Router {
    let store = SqliteRecordStore::new(db.pool().clone());
    router::build(AppState::new(RecordService::new(store)))
}

/// Serve `app` until `signal` resolves, then give in-flight requests at most
/// `grace` to complete before returning.
async fn run<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            stopping_tx.send_replace(true);
        })
        .into_future();

    let grace_expired = async move {
        if stopping_rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        served = server => served,
        () = grace_expired => {
            tracing::warn!(?grace, "requests still in flight after shutdown grace period, dropping them");
            Ok(())
        }
    }
}

/// Resolve on CTRL+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received CTRL+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
