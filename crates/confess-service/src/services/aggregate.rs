//! Aggregate counter maintainer
//!
//! The only path through which the denormalized `reactions` maps,
//! `comments_count`, and user lifetime totals are mutated. Services hand
//! it completed ledger/thread-store transitions; it translates each into
//! atomic storage updates, exactly once per transition.

use confess_core::{ReactionUpdate, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Aggregate counter maintainer
pub struct AggregateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AggregateService<'a> {
    /// Create a new AggregateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fold a ledger transition into the subject's emoji-count map.
    ///
    /// An `unchanged` transition carries no delta and is skipped, so
    /// repeated identical upserts cannot inflate counts.
    #[instrument(skip(self, update))]
    pub async fn apply_reaction_update(&self, update: &ReactionUpdate) -> ServiceResult<()> {
        if !update.is_mutation() {
            return Ok(());
        }

        self.ctx
            .aggregate_repo()
            .apply_reaction_delta(
                update.subject,
                update.old_emoji.as_deref(),
                update.new_emoji.as_deref(),
            )
            .await?;

        Ok(())
    }

    /// A comment was created on the confession
    #[instrument(skip(self))]
    pub async fn comment_created(
        &self,
        confession_id: Snowflake,
        author_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        self.ctx
            .aggregate_repo()
            .increment_comments(confession_id)
            .await?;

        if let Some(author_id) = author_id {
            self.ctx.aggregate_repo().record_comment(author_id).await?;
        }

        Ok(())
    }

    /// A comment was deleted from the confession
    #[instrument(skip(self))]
    pub async fn comment_deleted(&self, confession_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .aggregate_repo()
            .decrement_comments(confession_id)
            .await?;

        Ok(())
    }

    /// A confession was created by the user
    #[instrument(skip(self))]
    pub async fn confession_created(&self, author_id: Snowflake) -> ServiceResult<()> {
        self.ctx.aggregate_repo().record_post(author_id).await?;
        Ok(())
    }
}
