//! PostgreSQL implementation of ConfessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use confess_core::traits::{ConfessionRepository, Page, PageQuery, RepoResult};
use confess_core::{Confession, GeoPoint, Snowflake};

use crate::models::ConfessionModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = "id, text, longitude, latitude, address, category_id, author_id, \
     reactions, comments_count, is_reported, report_count, created_at, edited_at";

/// PostgreSQL implementation of ConfessionRepository
#[derive(Clone)]
pub struct PgConfessionRepository {
    pool: PgPool,
}

impl PgConfessionRepository {
    /// Create a new PgConfessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfessionRepository for PgConfessionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Confession>> {
        let result = sqlx::query_as::<_, ConfessionModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM confessions WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Confession::from))
    }

    #[instrument(skip(self, confession))]
    async fn create(&self, confession: &Confession) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO confessions
                (id, text, longitude, latitude, address, category_id, author_id,
                 reactions, comments_count, is_reported, report_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{}'::jsonb, 0, $8, $9, $10)
            "#,
        )
        .bind(confession.id.into_inner())
        .bind(&confession.text)
        .bind(confession.location.longitude)
        .bind(confession.location.latitude)
        .bind(&confession.address)
        .bind(confession.category_id.into_inner())
        .bind(confession.author_id.into_inner())
        .bind(confession.is_reported)
        .bind(confession.report_count)
        .bind(confession.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_content(
        &self,
        id: Snowflake,
        text: Option<&str>,
        category_id: Option<Snowflake>,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE confessions
            SET text = COALESCE($2, text),
                category_id = COALESCE($3, category_id),
                edited_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(text)
        .bind(category_id.map(Snowflake::into_inner))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM confessions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        category_id: Option<Snowflake>,
        query: PageQuery,
    ) -> RepoResult<Page<Confession>> {
        let results = sqlx::query_as::<_, ConfessionModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM confessions
            WHERE ($1::bigint IS NULL OR category_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category_id.map(Snowflake::into_inner))
        .bind(query.size)
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM confessions
            WHERE ($1::bigint IS NULL OR category_id = $1)
            "#,
        )
        .bind(category_id.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page {
            items: results.into_iter().map(Confession::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn list_by_author(
        &self,
        author_id: Snowflake,
        query: PageQuery,
    ) -> RepoResult<Page<Confession>> {
        let results = sqlx::query_as::<_, ConfessionModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM confessions
            WHERE author_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(author_id.into_inner())
        .bind(query.size)
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM confessions WHERE author_id = $1")
                .bind(author_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(Page {
            items: results.into_iter().map(Confession::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_nearby(
        &self,
        center: GeoPoint,
        max_distance_m: f64,
        limit: i64,
    ) -> RepoResult<Vec<Confession>> {
        // Haversine evaluated in SQL; proximity indexing is the storage
        // engine's concern, not this layer's.
        let results = sqlx::query_as::<_, ConfessionModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM (
                SELECT *,
                    2 * 6371000 * asin(sqrt(
                        power(sin(radians(latitude - $2) / 2), 2) +
                        cos(radians($2)) * cos(radians(latitude)) *
                        power(sin(radians(longitude - $1) / 2), 2)
                    )) AS distance_m
                FROM confessions
            ) with_distance
            WHERE distance_m <= $3
            ORDER BY distance_m
            LIMIT $4
            "#
        ))
        .bind(center.longitude)
        .bind(center.latitude)
        .bind(max_distance_m)
        .bind(limit.clamp(1, 500))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Confession::from).collect())
    }

    #[instrument(skip(self))]
    async fn author_username(&self, author_id: Snowflake) -> RepoResult<Option<String>> {
        let username =
            sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
                .bind(author_id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgConfessionRepository>();
    }
}
