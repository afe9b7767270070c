//! Gateway message format
//!
//! Defines the structure for all WebSocket messages.

use super::{CloseCode, HelloPayload, OpCode, TopicPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
///
/// All messages sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event type (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            s: Some(sequence),
            d: Some(data),
        }
    }

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(payload: HelloPayload) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            s: None,
            d: None,
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse as a Subscribe payload (op=2)
    pub fn as_subscribe(&self) -> Option<TopicPayload> {
        if self.op != OpCode::Subscribe {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as an Unsubscribe payload (op=3)
    pub fn as_unsubscribe(&self) -> Option<TopicPayload> {
        if self.op != OpCode::Unsubscribe {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse the heartbeat sequence number (op=1)
    pub fn as_heartbeat_seq(&self) -> Option<Option<u64>> {
        if self.op != OpCode::Heartbeat {
            return None;
        }
        Some(self.d.as_ref().and_then(|d| d.as_u64()))
    }

    // === Utilities ===

    /// Check if this is a valid client message
    #[must_use]
    pub fn is_valid_client_message(&self) -> bool {
        self.op.is_client_op()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create an error close frame
    #[must_use]
    pub fn close_frame(code: CloseCode) -> (u16, String) {
        (code.as_u16(), code.description().to_string())
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayMessage(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayMessage(op={})", self.op)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_message() {
        let msg = GatewayMessage::dispatch(
            "commentAdded",
            42,
            serde_json::json!({"id": "12345", "text": "same"}),
        );

        assert_eq!(msg.op, OpCode::Dispatch);
        assert_eq!(msg.t, Some("commentAdded".to_string()));
        assert_eq!(msg.s, Some(42));
        assert!(msg.d.is_some());
    }

    #[test]
    fn test_hello_message() {
        let msg = GatewayMessage::hello(HelloPayload::with_interval(45_000));
        assert_eq!(msg.op, OpCode::Hello);

        let json = msg.to_json().unwrap();
        assert!(json.contains("45000"));
    }

    #[test]
    fn test_heartbeat_ack_message() {
        let msg = GatewayMessage::heartbeat_ack();
        assert_eq!(msg.op, OpCode::HeartbeatAck);
        assert!(msg.t.is_none());
        assert!(msg.s.is_none());
        assert!(msg.d.is_none());
    }

    #[test]
    fn test_parse_subscribe() {
        let msg = GatewayMessage {
            op: OpCode::Subscribe,
            t: None,
            s: None,
            d: Some(serde_json::json!({"topic": "category:77"})),
        };

        let payload = msg.as_subscribe().unwrap();
        assert_eq!(payload.topic, "category:77");

        // Wrong op parses to nothing
        assert!(msg.as_unsubscribe().is_none());
    }

    #[test]
    fn test_parse_heartbeat() {
        let msg = GatewayMessage {
            op: OpCode::Heartbeat,
            t: None,
            s: None,
            d: Some(serde_json::Value::Number(41.into())),
        };

        let seq = msg.as_heartbeat_seq().unwrap();
        assert_eq!(seq, Some(41));

        let msg_null = GatewayMessage {
            op: OpCode::Heartbeat,
            t: None,
            s: None,
            d: None,
        };
        let seq_null = msg_null.as_heartbeat_seq().unwrap();
        assert_eq!(seq_null, None);
    }

    #[test]
    fn test_message_roundtrip() {
        let msg = GatewayMessage::dispatch("newConfession", 1, serde_json::json!({"id": "9"}));
        let json = msg.to_json().unwrap();
        let parsed = GatewayMessage::from_json(&json).unwrap();

        assert_eq!(parsed.op, msg.op);
        assert_eq!(parsed.t, msg.t);
        assert_eq!(parsed.s, msg.s);
    }

    #[test]
    fn test_close_frame() {
        let (code, desc) = GatewayMessage::close_frame(CloseCode::TopicDenied);
        assert_eq!(code, 4003);
        assert!(desc.contains("Topic"));
    }
}
