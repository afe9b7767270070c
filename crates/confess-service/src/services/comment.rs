//! Comment service
//!
//! Handles comment creation, editing, deletion, and listing. Create and
//! delete feed the aggregate counter maintainer; delete also purges the
//! comment's reaction ledger entries before the row goes away so a
//! re-run after a crash stays idempotent.

use chrono::Utc;
use confess_core::{Comment, PageQuery, Snowflake, SubjectRef};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, Paginated, UpdateCommentRequest};

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a confession
    #[instrument(skip(self, request))]
    pub async fn create_comment(&self, request: CreateCommentRequest) -> ServiceResult<CommentResponse> {
        // The parent must exist; the quoted comment deliberately is not
        // checked (weak reference, resolved at read time).
        self.ctx
            .confession_repo()
            .find_by_id(request.confession_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Confession", request.confession_id.to_string())
            })?;

        let comment = Comment {
            id: self.ctx.generate_id(),
            confession_id: request.confession_id,
            text: request.text,
            username: request.username,
            author_id: request.author_id,
            quoted_comment_id: request.quoted_comment_id,
            reactions: Default::default(),
            is_reported: false,
            report_count: 0,
            created_at: Utc::now(),
            edited_at: None,
        };

        self.ctx.comment_repo().create(&comment).await?;

        AggregateService::new(self.ctx)
            .comment_created(comment.confession_id, comment.author_id)
            .await?;

        info!(
            comment_id = %comment.id,
            confession_id = %comment.confession_id,
            "Comment created"
        );

        let response = CommentResponse::from(comment);

        // Broadcast after the row is durably committed
        self.ctx
            .publisher()
            .publish_comment_added(
                response.confession_id,
                serde_json::to_value(&response).unwrap_or_else(|_| json!({})),
            )
            .await
            .ok();

        Ok(response)
    }

    /// Edit a comment's text (author only)
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_authored_by(request.author_id) {
            return Err(ServiceError::not_author("comment"));
        }

        self.ctx
            .comment_repo()
            .update_text(comment_id, &request.text)
            .await?;

        info!(comment_id = %comment_id, "Comment updated");

        let updated = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        Ok(CommentResponse::from(updated))
    }

    /// Delete a comment (author only)
    ///
    /// Cascade ordering matters for crash consistency: ledger purge, then
    /// the comment row, then the parent counter. Purging an already-empty
    /// reaction set is a no-op, and a second delete of the same id reports
    /// NotFound without touching the counter again.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_authored_by(author_id) {
            return Err(ServiceError::not_author("comment"));
        }

        let purged = self
            .ctx
            .reaction_repo()
            .purge_subject(SubjectRef::comment(comment_id))
            .await?;

        let deleted = self.ctx.comment_repo().delete(comment_id).await?;

        if deleted {
            AggregateService::new(self.ctx)
                .comment_deleted(comment.confession_id)
                .await?;
        }

        info!(
            comment_id = %comment_id,
            confession_id = %comment.confession_id,
            reactions_purged = purged,
            "Comment deleted"
        );

        Ok(())
    }

    /// List comments on a confession, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        confession_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Paginated<CommentResponse>> {
        let page = self
            .ctx
            .comment_repo()
            .list_by_confession(confession_id, query)
            .await?;

        Ok(Paginated::new(
            page.map(|(comment, quoted)| CommentResponse::from_entity(comment, quoted)),
            query,
        ))
    }
}

#[cfg(test)]
mod tests {
    // Author gating and the delete cascade ordering are covered by entity
    // tests and the workspace integration tests.
}
