use std::sync::Arc;

use uuid::Uuid;

use super::Repositories;
use crate::context::RequestContext;
use crate::domain::{Category, Post, PostDraft, Tag, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{EXCERPT_EXTENSIONS, MarkupRenderer, UrlResolver};
use crate::text::excerpt_from_html;

/// Persistence façade for the content model.
///
/// Every write goes through here so derived fields are computed and
/// references checked before anything reaches a repository.
pub struct PostService {
    repos: Repositories,
    markup: Arc<dyn MarkupRenderer>,
    urls: Arc<dyn UrlResolver>,
}

impl PostService {
    pub fn new(
        repos: Repositories,
        markup: Arc<dyn MarkupRenderer>,
        urls: Arc<dyn UrlResolver>,
    ) -> Self {
        Self {
            repos,
            markup,
            urls,
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Validate, derive and persist a post.
    ///
    /// A draft carrying an id updates that post and fails with `NotFound`
    /// if it does not exist. The stored view counter is never overwritten.
    pub async fn save(&self, ctx: &RequestContext, draft: PostDraft) -> Result<Post, DomainError> {
        let update_of = draft.id;
        let mut post = draft.into_post()?;

        self.derive_fields(&mut post)?;
        post.validate()?;
        self.check_references(&post).await?;

        if let Some(id) = update_of {
            let stored = self
                .repos
                .posts
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Post", id))?;
            post.views = stored.views;
        }

        let saved = self.repos.posts.save(post).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            post_id = %saved.id,
            updated = update_of.is_some(),
            "Post saved"
        );
        Ok(saved)
    }

    /// Pre-persistence step: fill in fields computed from other fields.
    ///
    /// An empty excerpt becomes the first word of the rendered body plus an
    /// ellipsis.
    pub fn derive_fields(&self, post: &mut Post) -> Result<(), DomainError> {
        if post.excerpt.is_empty() {
            let html = self.markup.render(&post.body, EXCERPT_EXTENSIONS);
            post.excerpt = excerpt_from_html(&html).ok_or_else(|| {
                DomainError::invalid("body has no text to derive an excerpt from")
            })?;
        }
        Ok(())
    }

    async fn check_references(&self, post: &Post) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        if self
            .repos
            .categories
            .find_by_id(post.category_id)
            .await?
            .is_none()
        {
            errors.push(format!("category {} does not exist", post.category_id));
        }
        if self.repos.users.find_by_id(post.author_id).await?.is_none() {
            errors.push(format!("author {} does not exist", post.author_id));
        }
        if !post.tag_ids.is_empty() {
            let existing = self.repos.tags.existing_ids(&post.tag_ids).await?;
            for id in post.tag_ids.iter().filter(|id| !existing.contains(id)) {
                errors.push(format!("tag {id} does not exist"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    /// Count one more read of a post.
    pub async fn increase_views(&self, ctx: &RequestContext, id: Uuid) -> Result<(), DomainError> {
        match self.repos.posts.increment_views(id, 1).await {
            Ok(()) => {
                tracing::debug!(request_id = %ctx.request_id, post_id = %id, "View counted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::not_found("Post", id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn canonical_url(&self, post: &Post) -> String {
        self.urls.post_detail(post.id)
    }

    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Category, DomainError> {
        let category = Category::new(name.trim());
        category.validate()?;
        let saved = self.repos.categories.save(category).await?;
        tracing::info!(request_id = %ctx.request_id, category_id = %saved.id, "Category created");
        Ok(saved)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.repos.categories.list().await?)
    }

    pub async fn create_tag(&self, ctx: &RequestContext, name: &str) -> Result<Tag, DomainError> {
        let tag = Tag::new(name.trim());
        tag.validate()?;
        let saved = self.repos.tags.save(tag).await?;
        tracing::info!(request_id = %ctx.request_id, tag_id = %saved.id, "Tag created");
        Ok(saved)
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.repos.tags.list().await?)
    }

    /// Register an author identity posts can point at.
    pub async fn create_author(
        &self,
        ctx: &RequestContext,
        username: &str,
        email: &str,
    ) -> Result<User, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::invalid("username is required"));
        }
        if self.repos.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::invalid(format!(
                "username {username} is already taken"
            )));
        }

        let user = User::new(username.to_string(), email.trim().to_string());
        let saved = self.repos.users.save(user).await?;
        tracing::info!(request_id = %ctx.request_id, user_id = %saved.id, "Author registered");
        Ok(saved)
    }
}
