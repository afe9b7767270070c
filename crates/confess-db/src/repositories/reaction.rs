//! PostgreSQL implementation of the reaction ledger
//!
//! One row per (subject, user), enforced by a unique constraint. The
//! upsert implements the full transition table and absorbs concurrent
//! races internally: a losing insert re-reads the winner's row and
//! continues as an update, and emoji-guarded UPDATE/DELETE statements
//! retry when the row changed underneath them. Callers therefore receive
//! exactly one delta per actual mutation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use confess_core::traits::{ReactionRepository, RepoResult};
use confess_core::{
    DomainError, Reaction, ReactionAction, ReactionCount, ReactionUpdate, Snowflake, SubjectRef,
};

use crate::models::{ReactionCountModel, ReactionModel};

use super::error::map_db_error;

/// Upper bound on optimistic retries for one upsert.
///
/// Contention on a single (subject, user) pair requires the same client
/// racing itself; two spins resolve any realistic interleaving.
const MAX_ATTEMPTS: usize = 4;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fresh record; false when another writer won the race
    async fn try_insert(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO reactions (subject_kind, subject_id, user_id, emoji, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (subject_kind, subject_id, user_id) DO NOTHING
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .bind(emoji)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Swap the emoji, guarded by the emoji we read; false when the row
    /// changed or vanished in between
    async fn try_switch(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        from_emoji: &str,
        to_emoji: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reactions SET emoji = $5
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3 AND emoji = $4
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .bind(from_emoji)
        .bind(to_emoji)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the record, guarded by the emoji we read
    async fn try_remove(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3 AND emoji = $4
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .bind(emoji)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, subject: SubjectRef, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT subject_kind, subject_id, user_id, emoji, created_at
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: Snowflake,
        emoji: Option<String>,
        default_emoji: Option<&str>,
    ) -> RepoResult<ReactionUpdate> {
        for _ in 0..MAX_ATTEMPTS {
            let existing = self.find(subject, user_id).await?;

            match (existing, emoji.as_deref()) {
                (None, requested) => {
                    let chosen = match requested.or(default_emoji) {
                        Some(e) => e,
                        None => return Err(DomainError::EmojiRequired),
                    };

                    if self.try_insert(subject, user_id, chosen).await? {
                        return Ok(ReactionUpdate {
                            action: ReactionAction::Added,
                            subject,
                            user_id,
                            old_emoji: None,
                            new_emoji: Some(chosen.to_string()),
                        });
                    }
                    // Duplicate key: a concurrent upsert created the record
                    // first. Re-read and continue as an update.
                    debug!(%subject, %user_id, "lost reaction insert race, retrying as update");
                }
                (Some(record), None) => {
                    if self.try_remove(subject, user_id, &record.emoji).await? {
                        return Ok(ReactionUpdate {
                            action: ReactionAction::Removed,
                            subject,
                            user_id,
                            old_emoji: Some(record.emoji),
                            new_emoji: None,
                        });
                    }
                }
                (Some(record), Some(requested)) if record.emoji == requested => {
                    return Ok(ReactionUpdate {
                        action: ReactionAction::Unchanged,
                        subject,
                        user_id,
                        old_emoji: Some(record.emoji),
                        new_emoji: None,
                    });
                }
                (Some(record), Some(requested)) => {
                    if self
                        .try_switch(subject, user_id, &record.emoji, requested)
                        .await?
                    {
                        return Ok(ReactionUpdate {
                            action: ReactionAction::Updated,
                            subject,
                            user_id,
                            old_emoji: Some(record.emoji),
                            new_emoji: Some(requested.to_string()),
                        });
                    }
                }
            }
        }

        Err(DomainError::InternalError(format!(
            "reaction upsert contention exhausted for {subject} user {user_id}"
        )))
    }

    #[instrument(skip(self))]
    async fn purge_subject(&self, subject: SubjectRef) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE subject_kind = $1 AND subject_id = $2
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_by_emoji(&self, subject: SubjectRef) -> RepoResult<Vec<ReactionCount>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT emoji, COUNT(*) as count
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2
            GROUP BY emoji
            ORDER BY count DESC
            "#,
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|r| ReactionCount {
                emoji: r.emoji,
                count: r.count,
            })
            .collect())
    }
}
