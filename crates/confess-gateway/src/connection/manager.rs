//! Connection manager
//!
//! Manages all active WebSocket connections and the topic-subscription
//! table, using DashMap for thread-safe access. The table is keyed by
//! (topic key, session id); join and leave are its only mutators, and a
//! disconnect tears down every membership the connection held.

use super::Connection;
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// Topic key to session IDs mapping
    topic_connections: DashMap<String, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            topic_connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections.insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection and tear down its topic memberships.
    ///
    /// Returns the topic keys that lost their last member, so the caller
    /// can drop the corresponding upstream subscriptions.
    pub async fn remove_connection(&self, session_id: &str) -> Vec<String> {
        let mut emptied = Vec::new();

        if let Some((_, connection)) = self.connections.remove(session_id) {
            for topic in connection.topics().await {
                if self.leave_topic(session_id, &topic) {
                    emptied.push(topic);
                }
            }

            tracing::debug!(session_id = %session_id, "Connection removed");
        }

        emptied
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Join a connection to a topic.
    ///
    /// Returns true when the topic gained its first member (the caller
    /// should then subscribe upstream).
    pub async fn join_topic(&self, session_id: &str, topic: &str) -> Option<bool> {
        // Clone the Arc out so no shard guard is held across the await
        let connection = self.connections.get(session_id).map(|c| c.clone())?;
        connection.join_topic(topic).await;

        let mut first = false;
        self.topic_connections
            .entry(topic.to_string())
            .and_modify(|sessions| {
                sessions.insert(session_id.to_string());
            })
            .or_insert_with(|| {
                first = true;
                HashSet::from([session_id.to_string()])
            });

        tracing::trace!(
            session_id = %session_id,
            topic = %topic,
            first_member = first,
            "Connection joined topic"
        );

        Some(first)
    }

    /// Remove one membership from the topic table.
    ///
    /// Returns true when the topic is now empty (entry removed).
    fn leave_topic(&self, session_id: &str, topic: &str) -> bool {
        // Atomically modify the sessions set
        self.topic_connections.alter(topic, |_, mut sessions| {
            sessions.remove(session_id);
            sessions
        });

        let mut now_empty = false;
        self.topic_connections.retain(|key, sessions| {
            if key == topic && sessions.is_empty() {
                now_empty = true;
                false
            } else {
                true
            }
        });

        now_empty
    }

    /// Unjoin a connection from a topic.
    ///
    /// Returns true when the topic lost its last member.
    pub async fn unjoin_topic(&self, session_id: &str, topic: &str) -> Option<bool> {
        let connection = self.connections.get(session_id).map(|c| c.clone())?;
        connection.leave_topic(topic).await;

        let now_empty = self.leave_topic(session_id, topic);

        tracing::trace!(
            session_id = %session_id,
            topic = %topic,
            now_empty = now_empty,
            "Connection left topic"
        );

        Some(now_empty)
    }

    /// Get all connections joined to a topic
    pub fn get_topic_connections(&self, topic: &str) -> Vec<Arc<Connection>> {
        self.topic_connections
            .get(topic)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.connections.get(sid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send a message to every connection joined to a topic
    pub async fn send_to_topic(&self, topic: &str, message: GatewayMessage) -> usize {
        let connections = self.get_topic_connections(topic);
        let mut sent = 0;

        for conn in connections {
            if conn.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(topic = %topic, sent = sent, "Message sent to topic members");

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of topics with at least one member
    pub fn topic_count(&self) -> usize {
        self.topic_connections.len()
    }

    /// Check if a session exists
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("topics", &self.topic_connections.len())
            .finish()
    }
}
