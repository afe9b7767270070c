//! Reaction service
//!
//! Orchestrates one reaction upsert end to end: ledger transition,
//! aggregate counter delta, then the live broadcast. The counter is
//! adjusted only for transitions that actually mutated the ledger, and
//! the broadcast happens strictly after the mutation committed.

use confess_core::{ReactionUpdate, Snowflake, SubjectRef};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::ReactionResponse;

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a confession
    #[instrument(skip(self))]
    pub async fn react_to_confession(
        &self,
        confession_id: Snowflake,
        user_id: Snowflake,
        emoji: Option<String>,
    ) -> ServiceResult<ReactionResponse> {
        // Verify the confession exists
        self.ctx
            .confession_repo()
            .find_by_id(confession_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Confession", confession_id.to_string()))?;

        let update = self
            .upsert(SubjectRef::confession(confession_id), user_id, emoji)
            .await?;

        Ok(ReactionResponse::from(update))
    }

    /// React to a comment
    #[instrument(skip(self))]
    pub async fn react_to_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
        emoji: Option<String>,
    ) -> ServiceResult<ReactionResponse> {
        // Verify the comment exists
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        let update = self
            .upsert(SubjectRef::comment(comment_id), user_id, emoji)
            .await?;

        if update.is_mutation() {
            self.publish_comment_reaction(comment_id, &update).await;
        }

        Ok(ReactionResponse::from(update))
    }

    /// Run the ledger transition and fold the delta into the aggregates
    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        emoji: Option<String>,
    ) -> ServiceResult<ReactionUpdate> {
        let config = self.ctx.reaction_config();
        let default_emoji = if config.require_explicit_emoji {
            None
        } else {
            Some(config.default_emoji.as_str())
        };

        let update = self
            .ctx
            .reaction_repo()
            .upsert(subject, user_id, emoji, default_emoji)
            .await?;

        if update.is_mutation() {
            AggregateService::new(self.ctx)
                .apply_reaction_update(&update)
                .await?;

            info!(
                subject = %subject,
                user_id = %user_id,
                action = %update.action,
                "Reaction ledger updated"
            );
        }

        Ok(update)
    }

    /// Broadcast a reaction change on the comment's reaction topic.
    ///
    /// Best-effort: a failed publish is logged by the publisher and
    /// dropped, never failing the mutation it describes.
    async fn publish_comment_reaction(&self, comment_id: Snowflake, update: &ReactionUpdate) {
        let data = json!({
            "commentId": comment_id.to_string(),
            "userId": update.user_id.to_string(),
            "emoji": update.current_emoji(),
            "action": update.action,
            "oldEmoji": update.old_emoji,
        });

        self.ctx
            .publisher()
            .publish_comment_reaction_updated(comment_id, data)
            .await
            .ok();
    }
}
