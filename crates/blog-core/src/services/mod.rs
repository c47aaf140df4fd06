//! Application services - the content model façade and the view layer.

mod content;
mod views;

use std::sync::Arc;

use crate::ports::{
    CategoryRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};

pub use content::PostService;
pub use views::{BlogViews, ListedPost, PostDetailContext, PostListContext};

/// Handles to every store the services read or write.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub comments: Arc<dyn CommentRepository>,
}
