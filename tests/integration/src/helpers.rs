//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and asserting on responses.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use confess_api::{create_app, create_app_state};
use confess_common::{
    AppConfig, AppSettings, CorsConfig, Environment, GatewayPolicyConfig, RateLimitConfig,
    ReactionConfig, SnowflakeConfig,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Check that the test environment is available.
///
/// Returns false (and the calling test returns early) when DATABASE_URL
/// or REDIS_URL is not set.
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    let ok = std::env::var("DATABASE_URL").is_ok() && std::env::var("REDIS_URL").is_ok();
    if !ok {
        eprintln!("Skipping integration test: DATABASE_URL / REDIS_URL not set");
    }
    ok
}

/// Build a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();

    Ok(AppConfig {
        app: AppSettings {
            name: "confess-server-test".to_string(),
            env: Environment::Development,
        },
        api: confess_common::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        gateway: confess_common::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: confess_common::DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        redis: confess_common::RedisConfig {
            url: std::env::var("REDIS_URL")?,
            max_connections: 5,
        },
        rate_limit: RateLimitConfig {
            // High enough that tests never trip the limiter
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
        snowflake: SnowflakeConfig { worker_id: 1 },
        reactions: ReactionConfig::default(),
        gateway_policy: GatewayPolicyConfig::default(),
    })
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config)
            .await
            .map_err(|e| anyhow!("app state: {e}"))?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.put(&url).json(body).send().await?)
    }

    /// Make a DELETE request with JSON body
    pub async fn delete<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).json(body).send().await?)
    }
}

/// Assert a response status, printing the body on mismatch
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("expected {expected}, got {status}: {body}"));
    }
    Ok(())
}

/// Assert a response status and deserialize the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status != expected {
        return Err(anyhow!("expected {expected}, got {status}: {body}"));
    }
    serde_json::from_str(&body).map_err(|e| anyhow!("invalid body ({e}): {body}"))
}
