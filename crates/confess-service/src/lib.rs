//! # confess-service
//!
//! Application layer: business services orchestrating the repositories,
//! the aggregate counter maintainer, and the live update broadcaster.

pub mod dto;
pub mod services;

pub use dto::{
    CategoryResponse, CommentReactRequest, CommentResponse, ConfessionReactRequest,
    ConfessionResponse, CreateCategoryRequest, CreateCommentRequest, CreateConfessionRequest,
    DeleteRequest, HealthResponse, Paginated, QuotedCommentResponse, ReactionResponse,
    ReadinessResponse, RegisterRequest, RegisterResponse, UpdateCommentRequest,
    UpdateConfessionRequest,
};
pub use services::{
    AggregateService, CategoryService, CommentService, ConfessionService, IdentityService,
    ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
