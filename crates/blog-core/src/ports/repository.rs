use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, PostFilter, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;

    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// `save` persists every column plus the tag associations, replacing the
/// stored tag set.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts selected by `filter`, newest `created_time` first.
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Atomically add `by` to the view counter of one post, touching no
    /// other column. `RepoError::NotFound` if the post does not exist.
    async fn increment_views(&self, id: Uuid, by: u32) -> Result<(), RepoError>;
}

/// Read side of the comment subsystem.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, oldest first.
    async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_for(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
