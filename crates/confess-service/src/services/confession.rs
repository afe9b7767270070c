//! Confession service
//!
//! Creation, queries, author-gated edit/delete, and the create-time
//! broadcasts (`confessionAdded` on the category topic, `newConfession`
//! on the global feed).

use chrono::Utc;
use confess_core::{Confession, GeoPoint, PageQuery, Snowflake, MAX_TEXT_LEN};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{
    ConfessionResponse, CreateConfessionRequest, Paginated, UpdateConfessionRequest,
};

use super::aggregate::AggregateService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default radius for nearby queries, in meters
const DEFAULT_NEARBY_DISTANCE_M: f64 = 1000.0;
/// Result cap for nearby queries
const NEARBY_LIMIT: i64 = 100;

/// Confession service
pub struct ConfessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConfessionService<'a> {
    /// Create a new ConfessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a confession
    #[instrument(skip(self, request))]
    pub async fn create_confession(
        &self,
        request: CreateConfessionRequest,
    ) -> ServiceResult<ConfessionResponse> {
        if !Confession::text_is_valid(&request.text) {
            return Err(confess_core::DomainError::TextTooLong { max: MAX_TEXT_LEN }.into());
        }
        if !request.location.is_valid() {
            return Err(confess_core::DomainError::InvalidCoordinates(
                request.location.to_string(),
            )
            .into());
        }

        // Both references must resolve before anything is written
        self.ctx
            .category_repo()
            .find_by_id(request.category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", request.category_id.to_string()))?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(request.author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.author_id.to_string()))?;

        let confession = Confession {
            id: self.ctx.generate_id(),
            text: request.text,
            location: request.location,
            address: request.address,
            category_id: request.category_id,
            author_id: request.author_id,
            reactions: Default::default(),
            comments_count: 0,
            is_reported: false,
            report_count: 0,
            created_at: Utc::now(),
            edited_at: None,
        };

        self.ctx.confession_repo().create(&confession).await?;

        AggregateService::new(self.ctx)
            .confession_created(confession.author_id)
            .await?;

        info!(
            confession_id = %confession.id,
            category_id = %confession.category_id,
            "Confession created"
        );

        let category_id = confession.category_id;
        let response =
            ConfessionResponse::from_entity(confession, Some(author.username), None);

        // Broadcast after the row is durably committed
        self.ctx
            .publisher()
            .publish_confession_added(
                category_id,
                serde_json::to_value(&response).unwrap_or_else(|_| json!({})),
            )
            .await
            .ok();

        Ok(response)
    }

    /// Get one confession, optionally enriched with the viewer's reaction
    #[instrument(skip(self))]
    pub async fn get_confession(
        &self,
        confession_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<ConfessionResponse> {
        let confession = self
            .ctx
            .confession_repo()
            .find_by_id(confession_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Confession", confession_id.to_string()))?;

        let author_username = self
            .ctx
            .confession_repo()
            .author_username(confession.author_id)
            .await?;

        let my_reaction = match viewer_id {
            Some(viewer) => self
                .ctx
                .reaction_repo()
                .find(confess_core::SubjectRef::confession(confession_id), viewer)
                .await?
                .map(|r| r.emoji),
            None => None,
        };

        Ok(ConfessionResponse::from_entity(
            confession,
            author_username,
            my_reaction,
        ))
    }

    /// List confessions newest first, optionally filtered by category
    #[instrument(skip(self))]
    pub async fn list_confessions(
        &self,
        category_id: Option<Snowflake>,
        query: PageQuery,
    ) -> ServiceResult<Paginated<ConfessionResponse>> {
        let page = self.ctx.confession_repo().list(category_id, query).await?;
        Ok(Paginated::new(page.map(ConfessionResponse::from), query))
    }

    /// List one author's confessions, newest first
    #[instrument(skip(self))]
    pub async fn list_by_author(
        &self,
        author_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Paginated<ConfessionResponse>> {
        let page = self
            .ctx
            .confession_repo()
            .list_by_author(author_id, query)
            .await?;
        Ok(Paginated::new(page.map(ConfessionResponse::from), query))
    }

    /// Confessions near a point
    #[instrument(skip(self))]
    pub async fn nearby_confessions(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance_m: Option<f64>,
    ) -> ServiceResult<Vec<ConfessionResponse>> {
        let center = GeoPoint::new(longitude, latitude);
        if !center.is_valid() {
            return Err(
                confess_core::DomainError::InvalidCoordinates(center.to_string()).into(),
            );
        }

        let confessions = self
            .ctx
            .confession_repo()
            .find_nearby(
                center,
                max_distance_m.unwrap_or(DEFAULT_NEARBY_DISTANCE_M),
                NEARBY_LIMIT,
            )
            .await?;

        Ok(confessions
            .into_iter()
            .map(ConfessionResponse::from)
            .collect())
    }

    /// Update text and/or category (author only)
    #[instrument(skip(self, request))]
    pub async fn update_confession(
        &self,
        confession_id: Snowflake,
        request: UpdateConfessionRequest,
    ) -> ServiceResult<ConfessionResponse> {
        let confession = self
            .ctx
            .confession_repo()
            .find_by_id(confession_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Confession", confession_id.to_string()))?;

        if confession.author_id != request.author_id {
            return Err(confess_core::DomainError::NotConfessionAuthor.into());
        }

        if let Some(ref text) = request.text {
            if !Confession::text_is_valid(text) {
                return Err(confess_core::DomainError::TextTooLong { max: MAX_TEXT_LEN }.into());
            }
        }
        if let Some(category_id) = request.category_id {
            self.ctx
                .category_repo()
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Category", category_id.to_string()))?;
        }

        self.ctx
            .confession_repo()
            .update_content(confession_id, request.text.as_deref(), request.category_id)
            .await?;

        info!(confession_id = %confession_id, "Confession updated");

        self.get_confession(confession_id, None).await
    }

    /// Delete a confession (author only)
    #[instrument(skip(self))]
    pub async fn delete_confession(
        &self,
        confession_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<()> {
        let confession = self
            .ctx
            .confession_repo()
            .find_by_id(confession_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Confession", confession_id.to_string()))?;

        if confession.author_id != author_id {
            return Err(confess_core::DomainError::NotConfessionAuthor.into());
        }

        self.ctx.confession_repo().delete(confession_id).await?;

        info!(confession_id = %confession_id, "Confession deleted");

        Ok(())
    }
}
