//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! repositories and the markdown renderer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod markup;

pub use database::{DatabaseConfig, DatabaseConnections, InMemoryStore};
pub use markup::MarkdownRenderer;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};
