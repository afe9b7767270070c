//! # confess-cache
//!
//! Redis layer: managed connection pool and the pub/sub plumbing behind
//! the live update broadcaster.
//!
//! The API process publishes events to topic-named Redis channels after
//! each committed mutation; the gateway process holds one resilient
//! subscriber and fans events out to its WebSocket clients. Delivery is
//! best-effort: publish failures never propagate to the originating
//! mutation.

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export pubsub types
pub use pubsub::{
    PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig,
    SubscriberError, SubscriberResult, Topic, ALL_CONFESSIONS_TOPIC, CATEGORY_TOPIC_PREFIX,
    CONFESSION_TOPIC_PREFIX, EVENT_COMMENT_ADDED, EVENT_COMMENT_REACTION_UPDATED,
    EVENT_CONFESSION_ADDED, EVENT_NEW_CONFESSION, REACTION_TOPIC_PREFIX,
};
