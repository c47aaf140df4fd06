//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create or replace a post. Required fields are checked
/// server-side so all missing ones can be reported at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Request to create a category or a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Request to register an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthorRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

/// A post as it appears in list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
    pub author_id: Uuid,
    pub views: u32,
    pub comment_count: u64,
}

/// Context of every list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub post_list: Vec<PostSummary>,
}

/// A single post with its body rendered to HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub body_html: String,
    pub excerpt: String,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
    pub author_id: Uuid,
    pub views: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentFormResponse {
    pub name: String,
    pub email: String,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub text: String,
    pub created_time: DateTime<Utc>,
}

/// Context of the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostDetail,
    pub form: CommentFormResponse,
    pub comment_list: Vec<CommentResponse>,
}

/// Response for a saved post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPostResponse {
    pub id: Uuid,
    pub url: String,
    pub excerpt: String,
}
