//! Category service

use chrono::Utc;
use confess_core::Category;
use tracing::{info, instrument};

use crate::dto::{CategoryResponse, CreateCategoryRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a category; the name must be unique
    #[instrument(skip(self, request))]
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        if self
            .ctx
            .category_repo()
            .find_by_name(&request.name)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("Category already exists"));
        }

        let category = Category {
            id: self.ctx.generate_id(),
            name: request.name,
            description: request.description,
            created_at: Utc::now(),
        };

        // The unique constraint catches a concurrent creator that slipped
        // past the check above; the repo maps it to the same conflict.
        self.ctx.category_repo().create(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(CategoryResponse::from(category))
    }

    /// List all categories ordered by name
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }
}
