//! Confession gateway server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p confess-gateway
//! ```

use confess_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting confession gateway...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.gateway.port,
        open_topics = config.gateway_policy.open_topics,
        "Configuration loaded"
    );

    confess_gateway::run(config).await?;

    Ok(())
}
