//! Op code payloads

use serde::{Deserialize, Serialize};

/// Hello payload (op 10), sent by the server on connect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// How often the client should heartbeat, in milliseconds
    pub heartbeat_interval_ms: u64,
}

impl HelloPayload {
    /// Create a Hello payload with the given interval
    #[must_use]
    pub fn with_interval(heartbeat_interval_ms: u64) -> Self {
        Self {
            heartbeat_interval_ms,
        }
    }
}

/// Subscribe/Unsubscribe payload (ops 2 and 3), naming a topic key
/// such as `category:123`, `confession:456`, `reaction-789`, or
/// `confessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPayload {
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_payload() {
        let payload = HelloPayload::with_interval(45_000);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("45000"));
    }

    #[test]
    fn test_topic_payload() {
        let payload: TopicPayload = serde_json::from_str(r#"{"topic":"category:7"}"#).unwrap();
        assert_eq!(payload.topic, "category:7");
    }
}
