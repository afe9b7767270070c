//! Value objects - immutable domain primitives

mod geo;
mod snowflake;

pub use geo::GeoPoint;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
