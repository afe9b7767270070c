//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AggregateRepository, CategoryRepository, CommentRepository, ConfessionRepository, Page,
    PageQuery, ReactionRepository, RepoResult, UserRepository,
};
