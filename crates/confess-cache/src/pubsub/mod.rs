//! Pub/Sub: topic naming, publisher, and subscriber

mod channels;
mod publisher;
mod subscriber;

pub use channels::{
    Topic, ALL_CONFESSIONS_TOPIC, CATEGORY_TOPIC_PREFIX, CONFESSION_TOPIC_PREFIX,
    REACTION_TOPIC_PREFIX,
};
pub use publisher::{
    PubSubEvent, Publisher, EVENT_COMMENT_ADDED, EVENT_COMMENT_REACTION_UPDATED,
    EVENT_CONFESSION_ADDED, EVENT_NEW_CONFESSION,
};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
