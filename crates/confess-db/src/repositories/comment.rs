//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use confess_core::traits::{CommentRepository, Page, PageQuery, RepoResult};
use confess_core::{Comment, QuotedComment, Snowflake};

use crate::models::{CommentModel, CommentWithQuoteModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, confession_id, text, username, author_id, quoted_comment_id,
                   reactions, is_reported, report_count, created_at, edited_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments
                (id, confession_id, text, username, author_id, quoted_comment_id,
                 reactions, is_reported, report_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, '{}'::jsonb, $7, $8, $9)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.confession_id.into_inner())
        .bind(&comment.text)
        .bind(&comment.username)
        .bind(comment.author_id.map(Snowflake::into_inner))
        .bind(comment.quoted_comment_id.map(Snowflake::into_inner))
        .bind(comment.is_reported)
        .bind(comment.report_count)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, text))]
    async fn update_text(&self, id: Snowflake, text: &str) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE comments SET text = $2, edited_at = NOW() WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_by_confession(
        &self,
        confession_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Page<(Comment, Option<QuotedComment>)>> {
        // LEFT JOIN resolves the weak quote reference at read time; a
        // deleted quote target simply yields NULL preview columns.
        let results = sqlx::query_as::<_, CommentWithQuoteModel>(
            r#"
            SELECT c.id, c.confession_id, c.text, c.username, c.author_id,
                   c.quoted_comment_id, c.reactions, c.is_reported, c.report_count,
                   c.created_at, c.edited_at,
                   q.text AS quoted_text, q.username AS quoted_username
            FROM comments c
            LEFT JOIN comments q ON q.id = c.quoted_comment_id
            WHERE c.confession_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(confession_id.into_inner())
        .bind(query.size)
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE confession_id = $1",
        )
        .bind(confession_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page {
            items: results
                .into_iter()
                .map(CommentWithQuoteModel::into_parts)
                .collect(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
