//! Event dispatcher
//!
//! Receives events from Redis Pub/Sub and fans them out to the
//! WebSocket connections joined to the matching topic. Redis channel
//! subscriptions follow topic membership: the first member of a topic
//! subscribes the channel, the last leaver drops it. The global
//! confession feed stays subscribed for the dispatcher's lifetime.
//!
//! Delivery is at-most-once: lagged or unparseable messages are logged
//! and dropped, never retried.

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;
use confess_cache::{ReceivedMessage, Subscriber, SubscriberBuilder, Topic};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Configuration for the event dispatcher
#[derive(Debug, Clone)]
pub struct EventDispatcherConfig {
    /// Redis URL
    pub redis_url: String,
    /// Broadcast buffer size
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for EventDispatcherConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Event dispatcher routing Redis Pub/Sub messages to topic members
pub struct EventDispatcher {
    /// Connection manager for sending messages
    connection_manager: Arc<ConnectionManager>,
    /// Redis subscriber
    subscriber: Subscriber,
    /// Whether the dispatcher is running
    running: Arc<AtomicBool>,
    /// Sequence number for dispatched events
    sequence: Arc<AtomicU64>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub async fn new(
        config: EventDispatcherConfig,
        connection_manager: Arc<ConnectionManager>,
    ) -> Result<Self, confess_cache::SubscriberError> {
        let subscriber = SubscriberBuilder::new()
            .redis_url(&config.redis_url)
            .broadcast_buffer(config.broadcast_buffer)
            .reconnect_delay_ms(config.reconnect_delay_ms)
            // The global feed is always live
            .subscribe(Topic::all_confessions())
            .build()
            .await?;

        Ok(Self {
            connection_manager,
            subscriber,
            running: Arc::new(AtomicBool::new(false)),
            sequence: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Subscribe the upstream Redis channel for a topic
    pub async fn subscribe_topic(&self, topic: &Topic) -> Result<(), confess_cache::SubscriberError> {
        self.subscriber.subscribe(std::slice::from_ref(topic)).await
    }

    /// Unsubscribe the upstream Redis channel for a topic
    pub async fn unsubscribe_topic(
        &self,
        topic: &Topic,
    ) -> Result<(), confess_cache::SubscriberError> {
        // The global feed never unsubscribes
        if matches!(topic, Topic::AllConfessions) {
            return Ok(());
        }
        self.subscriber.unsubscribe(std::slice::from_ref(topic)).await
    }

    /// Get the next sequence number
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Start the event dispatcher
    ///
    /// This spawns a background task that receives messages from Redis
    /// and dispatches them to topic members.
    pub fn start(self: Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Event dispatcher is already running");
            return;
        }

        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher.run().await;
        });

        tracing::info!("Event dispatcher started");
    }

    /// Stop the event dispatcher
    pub async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.subscriber.shutdown().await.ok();
        tracing::info!("Event dispatcher stopped");
    }

    /// Run the event dispatcher loop
    async fn run(&self) {
        let mut receiver = self.subscriber.receiver();

        while self.running.load(Ordering::SeqCst) {
            match receiver.recv().await {
                Ok(msg) => {
                    self.handle_message(msg).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "Event dispatcher lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::warn!("Event dispatcher channel closed");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Event dispatcher loop ended");
    }

    /// Handle a received message from Redis
    async fn handle_message(&self, msg: ReceivedMessage) {
        let event = match &msg.event {
            Some(e) => e,
            None => {
                tracing::debug!(
                    topic = %msg.topic,
                    "Received non-event message, ignoring"
                );
                return;
            }
        };

        if let Topic::Custom(name) = &msg.topic {
            tracing::debug!(
                topic = %name,
                event_type = %event.event_type,
                "Received event on unrecognized topic, ignoring"
            );
            return;
        }

        let seq = self.next_sequence();
        let gateway_msg = GatewayMessage::dispatch(&event.event_type, seq, event.data.clone());

        let sent = self
            .connection_manager
            .send_to_topic(&msg.topic.name(), gateway_msg)
            .await;

        tracing::trace!(
            topic = %msg.topic,
            event_type = %event.event_type,
            sent = sent,
            "Event dispatched to topic"
        );
    }

    /// Check if the dispatcher is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for EventDispatcher {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_config_default() {
        let config = EventDispatcherConfig::default();
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.broadcast_buffer, 1024);
        assert_eq!(config.reconnect_delay_ms, 1000);
    }
}
