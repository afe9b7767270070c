//! Redis Pub/Sub publisher.
//!
//! Publishes events to topic channels for distribution to WebSocket
//! clients. Publishing happens only after the underlying storage mutation
//! has committed; callers swallow publish errors so a broadcast failure
//! never fails the mutation it describes.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::Topic;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event name for a confession arriving in a category topic
pub const EVENT_CONFESSION_ADDED: &str = "confessionAdded";
/// Event name for a confession arriving in the global feed
pub const EVENT_NEW_CONFESSION: &str = "newConfession";
/// Event name for a comment arriving in a confession topic
pub const EVENT_COMMENT_ADDED: &str = "commentAdded";
/// Event name for a reaction change in a comment's reaction topic
pub const EVENT_COMMENT_REACTION_UPDATED: &str = "commentReactionUpdated";

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "confessionAdded")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a topic
    pub async fn publish(&self, topic: &Topic, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = topic.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            topic = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish to multiple topics
    pub async fn publish_many(&self, topics: &[Topic], event: &PubSubEvent) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut total_receivers = 0;
        let mut conn = self.pool.get().await?;

        for topic in topics {
            let channel_name = topic.name();
            let receivers: u32 = conn.publish(&channel_name, &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            topics = topics.len(),
            event_type = %event.event_type,
            total_receivers = total_receivers,
            "Published event to multiple topics"
        );

        Ok(total_receivers)
    }
}

/// Convenience methods for the broadcaster's event families
impl Publisher {
    /// Announce a new confession: `confessionAdded` on its category topic
    /// and `newConfession` on the global feed
    pub async fn publish_confession_added(
        &self,
        category_id: confess_core::Snowflake,
        confession_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let category_event = PubSubEvent::new(EVENT_CONFESSION_ADDED, confession_data.clone());
        let mut receivers = self
            .publish(&Topic::category(category_id), &category_event)
            .await?;

        let global_event = PubSubEvent::new(EVENT_NEW_CONFESSION, confession_data);
        receivers += self
            .publish(&Topic::all_confessions(), &global_event)
            .await?;

        Ok(receivers)
    }

    /// Announce a new comment on its confession's topic
    pub async fn publish_comment_added(
        &self,
        confession_id: confess_core::Snowflake,
        comment_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(EVENT_COMMENT_ADDED, comment_data);
        self.publish(&Topic::confession(confession_id), &event).await
    }

    /// Announce a reaction change on the comment's reaction topic
    pub async fn publish_comment_reaction_updated(
        &self,
        comment_id: confess_core::Snowflake,
        reaction_data: serde_json::Value,
    ) -> RedisResult<u32> {
        let event = PubSubEvent::new(EVENT_COMMENT_REACTION_UPDATED, reaction_data);
        self.publish(&Topic::reaction(comment_id), &event).await
    }
}
