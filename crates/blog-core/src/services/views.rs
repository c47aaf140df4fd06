use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::PostService;
use crate::context::RequestContext;
use crate::domain::{Comment, CommentForm, Post, PostFilter};
use crate::error::DomainError;
use crate::ports::{DISPLAY_EXTENSIONS, MarkupRenderer};

/// A post as it appears in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListedPost {
    pub post: Post,
    pub comment_count: u64,
}

/// Rendering context of every list view.
#[derive(Debug, Clone, Serialize)]
pub struct PostListContext {
    pub post_list: Vec<ListedPost>,
}

/// Rendering context of the detail view. `post.body` holds rendered HTML.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailContext {
    pub post: Post,
    pub form: CommentForm,
    pub comment_list: Vec<Comment>,
}

/// The read side of the blog: one shared listing plus a detail view.
pub struct BlogViews {
    content: Arc<PostService>,
    markup: Arc<dyn MarkupRenderer>,
}

impl BlogViews {
    pub fn new(content: Arc<PostService>, markup: Arc<dyn MarkupRenderer>) -> Self {
        Self { content, markup }
    }

    /// Posts selected by `filter`, newest first, each with its comment count.
    pub async fn list_posts(
        &self,
        ctx: &RequestContext,
        filter: PostFilter,
    ) -> Result<PostListContext, DomainError> {
        let repos = self.content.repositories();
        let mut posts = repos.posts.list(filter).await?;
        posts.sort_by(|a, b| b.created_time.cmp(&a.created_time));

        let mut post_list = Vec::with_capacity(posts.len());
        for post in posts {
            let comment_count = repos.comments.count_for(post.id).await?;
            post_list.push(ListedPost {
                post,
                comment_count,
            });
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            filter = ?filter,
            count = post_list.len(),
            "Listed posts"
        );
        Ok(PostListContext { post_list })
    }

    pub async fn list_all(&self, ctx: &RequestContext) -> Result<PostListContext, DomainError> {
        self.list_posts(ctx, PostFilter::All).await
    }

    pub async fn archive(
        &self,
        ctx: &RequestContext,
        year: i32,
        month: u32,
    ) -> Result<PostListContext, DomainError> {
        self.list_posts(ctx, PostFilter::archive(year, month)?).await
    }

    /// Posts of one category. An unknown category is `NotFound`; a known
    /// one without posts yields an empty list.
    pub async fn by_category(
        &self,
        ctx: &RequestContext,
        category_id: Uuid,
    ) -> Result<PostListContext, DomainError> {
        self.content
            .repositories()
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        self.list_posts(ctx, PostFilter::Category(category_id)).await
    }

    /// A single post with its body rendered, counting the read.
    pub async fn detail(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<PostDetailContext, DomainError> {
        let repos = self.content.repositories();
        let mut post = repos
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        self.content.increase_views(ctx, id).await?;
        post.views = post.views.saturating_add(1);
        post.body = self.markup.render(&post.body, DISPLAY_EXTENSIONS);

        let comment_list = repos.comments.comments_for(id).await?;

        Ok(PostDetailContext {
            post,
            form: CommentForm::default(),
            comment_list,
        })
    }
}
