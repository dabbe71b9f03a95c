// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, net::SocketAddr, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use checklist_server::{
    api::router,
    auth::password::hash_password_blocking,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    models::ADMIN_USERNAME,
    state::AppState,
    storage::{CredentialRepository, Database},
};

type BoxError = Box<dyn Error + Send + Sync>;

/// How long in-flight requests may run after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    let db = Database::open(&config.database_path).await?;
    tracing::info!(path = %config.database_path, "database ready");

    if let Some(password) = &config.admin_password {
        seed_admin(&db, password).await?;
    }

    let state = AppState::new(db, &config.jwt_secret)?;
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();

    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;

            tracing::info!(%addr, "listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app)
                .await?;
        }
        None => {
            tracing::info!(%addr, "listening on http (docs at /docs)");
            axum_server::bind(addr).handle(handle).serve(app).await?;
        }
    }

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Create the `admin` credential from `ADMIN_PASSWORD` unless it exists.
async fn seed_admin(db: &Database, password: &str) -> Result<(), BoxError> {
    let digest = hash_password_blocking(password.to_string()).await?;
    if CredentialRepository::new(db)
        .ensure(ADMIN_USERNAME, &digest)
        .await?
    {
        tracing::info!("seeded admin credential");
    } else {
        tracing::debug!("admin credential already present");
    }
    Ok(())
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("shutdown signal received");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
