//! Database row models
//!
//! Plain `FromRow` structs mirroring table shapes, with conversions into
//! the domain entities.

mod category;
mod comment;
mod confession;
mod reaction;
mod user;

pub use category::CategoryModel;
pub use comment::{CommentModel, CommentWithQuoteModel};
pub use confession::ConfessionModel;
pub use reaction::{ReactionCountModel, ReactionModel};
pub use user::UserModel;

use std::collections::BTreeMap;

/// Decode a JSONB emoji-count column into the domain map shape.
///
/// A malformed column decodes to an empty map rather than failing the
/// whole row.
pub(crate) fn decode_reactions(value: serde_json::Value) -> BTreeMap<String, i64> {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_reactions() {
        let map = decode_reactions(json!({"👍": 2, "❤️": 1}));
        assert_eq!(map.get("👍"), Some(&2));
        assert_eq!(map.get("❤️"), Some(&1));
    }

    #[test]
    fn test_decode_reactions_tolerates_garbage() {
        assert!(decode_reactions(json!("not a map")).is_empty());
        assert!(decode_reactions(json!(null)).is_empty());
    }
}
