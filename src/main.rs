//! Payroll engine HTTP server.
//!
//! Environment:
//! - `PAYROLL_CONFIG_DIR`: jurisdiction configuration directory
//!   (default `config/beijing_2024`)
//! - `PAYROLL_BIND`: listen address (default `0.0.0.0:8080`)
//! - `PAYROLL_LOG_JSON`: set to `1` for JSON log lines
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "config/beijing_2024";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("PAYROLL_LOG_JSON").is_ok_and(|v| v == "1");

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind = env::var("PAYROLL_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        jurisdiction = %config.metadata().code,
        effective_date = %config.metadata().effective_date,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
