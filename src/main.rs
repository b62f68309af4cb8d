//! JIT access API — binary entry point.
//!
//! Loads configuration, initializes logging, loads signing/verifying key
//! material from disk, bootstraps the composition root, and serves the
//! Axum router with graceful shutdown.

use jit_access_api::bootstrap::{Keys, bootstrap};
use jit_access_api::config::Config;
use jit_access_api::keys::{FileDecodingKeySource, FileSigningKeySource};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    config.validate()?;

    initialize_logging(&config)?;

    info!("starting JIT access API");
    info!("server: {}", config.server_address());
    info!("resource scope: {}", config.activation.resource_scope);

    let signing_key_path =
        std::env::var("JIT_SIGNING_KEY_PATH").unwrap_or_else(|_| "keys/signing.pem".to_string());
    let verifying_key_path = std::env::var("JIT_VERIFYING_KEY_PATH")
        .unwrap_or_else(|_| "keys/verifying.pem".to_string());
    let kid = std::env::var("JIT_SIGNING_KEY_ID").unwrap_or_else(|_| "jit-access-1".to_string());
    let issuer = format!(
        "jit-access@{}.iam.gserviceaccount.com",
        config.activation.resource_scope.replace('/', "-")
    );

    let signing = FileSigningKeySource::load(&signing_key_path, kid, issuer)
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;
    let decoding = FileDecodingKeySource::load(&verifying_key_path)
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;
    let keys = Keys {
        signing: Arc::new(signing),
        decoding: Arc::new(decoding),
    };

    let app_state = bootstrap(config.clone(), keys).map_err(|e| -> Box<dyn std::error::Error> {
        e.into()
    })?;

    let app = jit_access_api::build_router(app_state, &config);

    let listener = tokio::net::TcpListener::bind(config.server_address()).await?;
    let addr = listener.local_addr()?;

    info!("listening on http://{}", addr);
    info!("API documentation: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("JIT access API shut down gracefully");
    Ok(())
}

/// Initialize logging based on configuration.
fn initialize_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jit_access_api={}", config.logging.level)));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Listens for SIGTERM/SIGINT and returns, triggering graceful shutdown.
async fn shutdown_signal() {
    use tokio::signal;

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
            warn!("Received Ctrl+C signal");
        }
        _ = terminate => {
            warn!("Received SIGTERM signal");
        }
    }

    info!("Starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }
}
