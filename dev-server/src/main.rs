//! Development server for Loa Escuela UI development
//!
//! This binary runs the mock school backend with the standard fixture
//! dataset so the front-end can be developed without the real backend.
//!
//! Environment variables can be set directly or loaded from a .env file:
//! - IP_ADDRESS: bind address (defaults to 127.0.0.1)
//! - PORT: port to listen on (defaults to 8000, 0 for an OS-assigned port)
//! - RUST_LOG: log filter (defaults to info)
//!
//! Usage: cargo run -p dev-server

use anyhow::{Context, Result};
use test_helpers::mock::MockDataset;
use test_helpers::server::{self, MockBackend, MockConfig};
use test_helpers::telemetry::{get_subscriber, init_subscriber, log_error};
use tracing::info;

fn config_from_env() -> Result<MockConfig> {
    use std::env::var;

    let port = match var("PORT") {
        Ok(port) => port.parse().context("PORT must be a port number")?,
        Err(_) => 8000,
    };
    Ok(MockConfig {
        ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into()),
        port,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if available
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber);

    info!("🚀 Starting Loa Escuela development server");

    let mut config = config_from_env()?;
    let dataset = MockDataset::standard();
    dataset.print_summary();

    let server = server::build(&mut config, MockBackend::new(dataset))?;
    let handle = server.handle();
    let server = tokio::spawn(server);

    info!("🎯 Development server ready!");
    info!("   API: http://{}:{}", config.ip, config.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://{}:{} trunk serve",
        config.ip, config.port
    );
    info!("👋 Press Ctrl+C to shutdown");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutting down development server");
            handle.stop(true).await;
        }
        result = server => {
            match result {
                Ok(Err(e)) => log_error(e),
                Err(e) => log_error(e),
                Ok(Ok(())) => {}
            }
        }
    }
    Ok(())
}
