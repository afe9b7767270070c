//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its state. Connections
//! are anonymous; the only per-connection state is the heartbeat clock
//! and the set of joined topics.

use crate::protocol::GatewayMessage;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};

/// A single WebSocket connection
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Last sequence number sent
    sequence: AtomicU64,

    /// Last heartbeat received
    last_heartbeat: RwLock<Instant>,

    /// Whether we've received a heartbeat for the current interval
    heartbeat_acked: RwLock<bool>,

    /// Topic keys this connection has joined
    topics: RwLock<HashSet<String>>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            sender,
            sequence: AtomicU64::new(0),
            last_heartbeat: RwLock::new(Instant::now()),
            heartbeat_acked: RwLock::new(true),
            topics: RwLock::new(HashSet::new()),
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the next sequence number
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Get the current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Record a heartbeat received
    pub async fn record_heartbeat(&self) {
        *self.last_heartbeat.write().await = Instant::now();
    }

    /// Get time since last heartbeat
    pub async fn time_since_heartbeat(&self) -> std::time::Duration {
        self.last_heartbeat.read().await.elapsed()
    }

    /// Check if heartbeat was acknowledged
    pub async fn is_heartbeat_acked(&self) -> bool {
        *self.heartbeat_acked.read().await
    }

    /// Mark heartbeat as acknowledged
    pub async fn ack_heartbeat(&self) {
        *self.heartbeat_acked.write().await = true;
    }

    /// Join a topic
    pub async fn join_topic(&self, topic: impl Into<String>) {
        self.topics.write().await.insert(topic.into());
    }

    /// Leave a topic
    pub async fn leave_topic(&self, topic: &str) {
        self.topics.write().await.remove(topic);
    }

    /// Get all joined topic keys
    pub async fn topics(&self) -> Vec<String> {
        self.topics.read().await.iter().cloned().collect()
    }

    /// Check if joined to a topic
    pub async fn is_joined(&self, topic: &str) -> bool {
        self.topics.read().await.contains(topic)
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<GatewayMessage>> {
        self.sender.send(message).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_creation() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("session123".to_string(), tx);

        assert_eq!(conn.session_id(), "session123");
        assert!(conn.topics().await.is_empty());
    }

    #[tokio::test]
    async fn test_connection_sequence() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("session123".to_string(), tx);

        assert_eq!(conn.current_sequence(), 0);
        assert_eq!(conn.next_sequence(), 1);
        assert_eq!(conn.next_sequence(), 2);
        assert_eq!(conn.current_sequence(), 2);
    }

    #[tokio::test]
    async fn test_connection_topics() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("session123".to_string(), tx);

        conn.join_topic("category:1").await;
        conn.join_topic("confessions").await;

        assert!(conn.is_joined("category:1").await);
        assert!(conn.is_joined("confessions").await);
        assert_eq!(conn.topics().await.len(), 2);

        conn.leave_topic("category:1").await;
        assert!(!conn.is_joined("category:1").await);
        assert!(conn.is_joined("confessions").await);
    }

    #[tokio::test]
    async fn test_connection_heartbeat() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("session123".to_string(), tx);

        assert!(conn.is_heartbeat_acked().await);
        conn.record_heartbeat().await;
        assert!(conn.time_since_heartbeat().await < std::time::Duration::from_secs(1));
    }
}
