//! Post list, detail and authoring handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Post, PostDraft};
use blog_core::services::{ListedPost, PostDetailContext, PostListContext, PostService};
use blog_shared::ApiResponse;
use blog_shared::dto::{
    CommentFormResponse, CommentResponse, PostDetail, PostDetailResponse, PostListResponse,
    PostSummary, SavePostRequest, SavedPostResponse,
};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

fn summary(content: &PostService, listed: ListedPost) -> PostSummary {
    let url = content.canonical_url(&listed.post);
    let post = listed.post;
    PostSummary {
        id: post.id,
        url,
        title: post.title,
        excerpt: post.excerpt,
        created_time: post.created_time,
        modified_time: post.modified_time,
        category_id: post.category_id,
        tag_ids: post.tag_ids,
        author_id: post.author_id,
        views: post.views,
        comment_count: listed.comment_count,
    }
}

fn list_response(content: &PostService, ctx: PostListContext) -> HttpResponse {
    let post_list = ctx
        .post_list
        .into_iter()
        .map(|listed| summary(content, listed))
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(PostListResponse { post_list }))
}

fn detail_response(content: &PostService, ctx: PostDetailContext) -> PostDetailResponse {
    let url = content.canonical_url(&ctx.post);
    let post = ctx.post;
    PostDetailResponse {
        post: PostDetail {
            id: post.id,
            url,
            title: post.title,
            body_html: post.body,
            excerpt: post.excerpt,
            created_time: post.created_time,
            modified_time: post.modified_time,
            category_id: post.category_id,
            tag_ids: post.tag_ids,
            author_id: post.author_id,
            views: post.views,
        },
        form: CommentFormResponse {
            name: ctx.form.name,
            email: ctx.form.email,
            url: ctx.form.url,
            text: ctx.form.text,
        },
        comment_list: ctx
            .comment_list
            .into_iter()
            .map(|c| CommentResponse {
                id: c.id,
                name: c.name,
                url: c.url,
                text: c.text,
                created_time: c.created_time,
            })
            .collect(),
    }
}

fn draft(id: Option<Uuid>, req: SavePostRequest) -> PostDraft {
    PostDraft {
        id,
        title: req.title,
        body: req.body,
        excerpt: req.excerpt,
        created_time: req.created_time,
        modified_time: req.modified_time,
        category_id: req.category_id,
        author_id: req.author_id,
        tag_ids: req.tag_ids,
    }
}

fn saved(content: &PostService, post: &Post) -> SavedPostResponse {
    SavedPostResponse {
        id: post.id,
        url: content.canonical_url(post),
        excerpt: post.excerpt.clone(),
    }
}

/// GET /api/posts
pub async fn index(state: web::Data<AppState>, request_id: RequestId) -> AppResult<HttpResponse> {
    let ctx = state.views.list_all(&request_id.context()).await?;
    Ok(list_response(&state.content, ctx))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let ctx = state
        .views
        .detail(&request_id.context(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail_response(&state.content, ctx))))
}

/// GET /api/archives/{year}/{month}
pub async fn archives(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<(i32, u32)>,
) -> AppResult<HttpResponse> {
    let (year, month) = path.into_inner();
    let ctx = state
        .views
        .archive(&request_id.context(), year, month)
        .await?;
    Ok(list_response(&state.content, ctx))
}

/// GET /api/categories/{id}/posts
pub async fn category(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let ctx = state
        .views
        .by_category(&request_id.context(), path.into_inner())
        .await?;
    Ok(list_response(&state.content, ctx))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .save(&request_id.context(), draft(None, body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(saved(&state.content, &post))))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .content
        .save(&request_id.context(), draft(Some(id), body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved(&state.content, &post))))
}
