use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use finance_tracker::adapters::auth::JwtSessionValidator;
use finance_tracker::adapters::http::{build_router, middleware::AuthState, ProfileAppState};
use finance_tracker::adapters::profile::connect_store;
use finance_tracker::application::ProfileService;
use finance_tracker::config::{AppConfig, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        "starting finance tracker"
    );

    let store = connect_store(&config.storage).await?;
    let service = Arc::new(ProfileService::new(store));

    let auth = config.auth.as_ref().map(|auth| {
        tracing::info!(issuer = %auth.issuer, "bearer-token auth enabled");
        Arc::new(JwtSessionValidator::new(auth)) as AuthState
    });

    let app = build_router(ProfileAppState::new(service), auth, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// `RUST_LOG` overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
