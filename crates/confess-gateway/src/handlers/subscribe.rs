//! Subscribe/Unsubscribe handlers (ops 2 and 3)
//!
//! Joins are client-driven and require no authentication by default;
//! any connected client may name any topic key. The `open_topics`
//! policy narrows that to the global feed when disabled.

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{CloseCode, TopicPayload};
use crate::server::GatewayState;
use confess_cache::Topic;
use std::sync::Arc;

/// Handles topic join/leave requests
pub struct SubscribeHandler;

impl SubscribeHandler {
    /// Join a topic by key
    pub async fn join(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: TopicPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let topic = Topic::parse(&payload.topic);

        if !topic.is_known() {
            return Err(HandlerError::InvalidPayload(format!(
                "Unknown topic key: {}",
                payload.topic
            )));
        }

        if !state.config().gateway_policy.open_topics && !matches!(topic, Topic::AllConfessions) {
            tracing::debug!(
                session_id = %connection.session_id(),
                topic = %topic,
                "Topic join refused by policy"
            );
            return Err(HandlerError::TopicDenied(topic.name()));
        }

        let first_member = state
            .connection_manager()
            .join_topic(connection.session_id(), &topic.name())
            .await;

        if first_member == Some(true) {
            // First member: bring up the upstream Redis subscription.
            // Failure leaves the join in place; the member just receives
            // nothing until the subscriber reconnects.
            if let Err(e) = state.event_dispatcher().subscribe_topic(&topic).await {
                tracing::error!(
                    topic = %topic,
                    error = %e,
                    "Failed to subscribe upstream topic"
                );
            }
        }

        tracing::debug!(
            session_id = %connection.session_id(),
            topic = %topic,
            "Topic joined"
        );

        Ok(None)
    }

    /// Leave a topic by key
    pub async fn leave(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: TopicPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let topic = Topic::parse(&payload.topic);

        let now_empty = state
            .connection_manager()
            .unjoin_topic(connection.session_id(), &topic.name())
            .await;

        if now_empty == Some(true) {
            if let Err(e) = state.event_dispatcher().unsubscribe_topic(&topic).await {
                tracing::error!(
                    topic = %topic,
                    error = %e,
                    "Failed to unsubscribe upstream topic"
                );
            }
        }

        tracing::debug!(
            session_id = %connection.session_id(),
            topic = %topic,
            "Topic left"
        );

        Ok(None)
    }
}
