//! Payroll deduction HTTP server.
//!
//! Serves the deduction API over the built-in 2020 schedule, or over a
//! schedule directory named by `PAYROLL_CONFIG_DIR`.

use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("PAYROLL_CONFIG_DIR") {
        Ok(dir) => ConfigLoader::load(&dir)?,
        Err(_) => ConfigLoader::builtin(),
    };
    info!(
        schedule = %config.metadata().name,
        tax_year = config.metadata().tax_year,
        "Tax schedule ready"
    );

    let addr = std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("payroll-server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(AppState::new(config))).await?;
    Ok(())
}
