//! Atomic aggregate-counter updates
//!
//! The denormalized emoji-count maps and comment counters are adjusted
//! with server-side JSONB arithmetic in single UPDATE statements. Each
//! statement is atomic per row, and increments/decrements commute, so
//! concurrent writers converge without read-modify-write in application
//! code. A key whose count reaches zero is deleted from the map, never
//! stored as zero.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use confess_core::traits::{AggregateRepository, RepoResult};
use confess_core::{Snowflake, SubjectKind, SubjectRef};

use super::error::map_db_error;

/// PostgreSQL implementation of AggregateRepository
#[derive(Clone)]
pub struct PgAggregateRepository {
    pool: PgPool,
}

impl PgAggregateRepository {
    /// Create a new PgAggregateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    const fn table(kind: SubjectKind) -> &'static str {
        match kind {
            SubjectKind::Confession => "confessions",
            SubjectKind::Comment => "comments",
        }
    }

    /// `reactions[emoji] += 1`, creating the key at 1
    async fn increment_emoji(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subject: SubjectRef,
        emoji: &str,
    ) -> RepoResult<()> {
        let table = Self::table(subject.kind);
        sqlx::query(&format!(
            r#"
            UPDATE {table}
            SET reactions = jsonb_set(
                reactions,
                ARRAY[$2],
                to_jsonb(COALESCE((reactions ->> $2)::bigint, 0) + 1)
            )
            WHERE id = $1
            "#
        ))
        .bind(subject.id.into_inner())
        .bind(emoji)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// `reactions[emoji] -= 1`, deleting the key when the count reaches zero
    async fn decrement_emoji(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subject: SubjectRef,
        emoji: &str,
    ) -> RepoResult<()> {
        let table = Self::table(subject.kind);
        sqlx::query(&format!(
            r#"
            UPDATE {table}
            SET reactions = CASE
                WHEN COALESCE((reactions ->> $2)::bigint, 0) <= 1 THEN reactions - $2
                ELSE jsonb_set(
                    reactions,
                    ARRAY[$2],
                    to_jsonb((reactions ->> $2)::bigint - 1)
                )
            END
            WHERE id = $1
            "#
        ))
        .bind(subject.id.into_inner())
        .bind(emoji)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl AggregateRepository for PgAggregateRepository {
    #[instrument(skip(self))]
    async fn apply_reaction_delta(
        &self,
        subject: SubjectRef,
        old_emoji: Option<&str>,
        new_emoji: Option<&str>,
    ) -> RepoResult<()> {
        // Both halves of an emoji switch land in one transaction so a
        // crash cannot apply the decrement without the increment.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if let Some(old) = old_emoji {
            self.decrement_emoji(&mut tx, subject, old).await?;
        }
        if let Some(new) = new_emoji {
            self.increment_emoji(&mut tx, subject, new).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_comments(&self, confession_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE confessions SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(confession_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn decrement_comments(&self, confession_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE confessions
            SET comments_count = GREATEST(comments_count - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(confession_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_post(&self, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE users SET total_posts = total_posts + 1 WHERE id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_comment(&self, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE users SET total_comments = total_comments + 1 WHERE id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAggregateRepository>();
    }

    #[test]
    fn test_table_mapping() {
        assert_eq!(PgAggregateRepository::table(SubjectKind::Confession), "confessions");
        assert_eq!(PgAggregateRepository::table(SubjectKind::Comment), "comments");
    }
}
