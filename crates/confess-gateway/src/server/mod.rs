//! Gateway server setup

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use confess_common::{AppConfig, AppError};
use tokio::net::TcpListener;
use tracing::info;

use crate::broadcast::{EventDispatcher, EventDispatcherConfig};
use crate::connection::ConnectionManager;

/// Build the gateway state: connection manager plus a started dispatcher
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let connection_manager = ConnectionManager::new_shared();

    let dispatcher_config = EventDispatcherConfig {
        redis_url: config.redis.url.clone(),
        ..Default::default()
    };

    let event_dispatcher = Arc::new(
        EventDispatcher::new(dispatcher_config, connection_manager.clone())
            .await
            .map_err(|e| AppError::Cache(e.to_string()))?,
    );
    event_dispatcher.clone().start();

    Ok(GatewayState::new(
        connection_manager,
        event_dispatcher,
        config,
    ))
}

/// Build the gateway router
pub fn create_app(state: GatewayState) -> Router {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .with_state(state)
}

/// Run the gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
