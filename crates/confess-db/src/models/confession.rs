//! Confession database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use confess_core::{Confession, GeoPoint, Snowflake};

use super::decode_reactions;

/// Database model for the confessions table
#[derive(Debug, Clone, FromRow)]
pub struct ConfessionModel {
    pub id: i64,
    pub text: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: Option<String>,
    pub category_id: i64,
    pub author_id: i64,
    pub reactions: serde_json::Value,
    pub comments_count: i64,
    pub is_reported: bool,
    pub report_count: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<ConfessionModel> for Confession {
    fn from(model: ConfessionModel) -> Self {
        Self {
            id: Snowflake::new(model.id),
            text: model.text,
            location: GeoPoint::new(model.longitude, model.latitude),
            address: model.address,
            category_id: Snowflake::new(model.category_id),
            author_id: Snowflake::new(model.author_id),
            reactions: decode_reactions(model.reactions),
            comments_count: model.comments_count,
            is_reported: model.is_reported,
            report_count: model.report_count,
            created_at: model.created_at,
            edited_at: model.edited_at,
        }
    }
}
