//! Data transfer objects

mod requests;
mod responses;

pub use requests::{
    CommentReactRequest, ConfessionReactRequest, CreateCategoryRequest, CreateCommentRequest,
    CreateConfessionRequest, DeleteRequest, RegisterRequest, UpdateCommentRequest,
    UpdateConfessionRequest,
};
pub use responses::{
    CategoryResponse, CommentResponse, ConfessionResponse, HealthResponse, Paginated,
    QuotedCommentResponse, ReactionResponse, ReadinessResponse, RegisterResponse,
};
