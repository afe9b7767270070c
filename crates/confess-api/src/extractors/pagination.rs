//! Pagination extractor
//!
//! Extracts 1-based page/size parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use confess_core::PageQuery;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct RawPageParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// Validated pagination parameters (page >= 1, size clamped to 1..=100)
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageQuery);

impl From<RawPageParams> for PageParams {
    fn from(raw: RawPageParams) -> Self {
        Self(PageQuery::new(
            raw.page.unwrap_or(1),
            raw.size.unwrap_or(PageQuery::DEFAULT_SIZE),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(PageParams::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::from(RawPageParams {
            page: None,
            size: None,
        });
        assert_eq!(params.0.page, 1);
        assert_eq!(params.0.size, PageQuery::DEFAULT_SIZE);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams::from(RawPageParams {
            page: Some(0),
            size: Some(10_000),
        });
        assert_eq!(params.0.page, 1);
        assert_eq!(params.0.size, PageQuery::MAX_SIZE);
    }

    #[test]
    fn test_passthrough() {
        let params = PageParams::from(RawPageParams {
            page: Some(3),
            size: Some(25),
        });
        assert_eq!(params.0.page, 3);
        assert_eq!(params.0.size, 25);
        assert_eq!(params.0.offset(), 50);
    }
}
