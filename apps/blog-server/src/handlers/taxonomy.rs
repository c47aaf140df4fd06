//! Category and tag handlers.

use actix_web::{HttpResponse, web};

use blog_shared::ApiResponse;
use blog_shared::dto::{CategoryResponse, NameRequest, TagResponse};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories: Vec<CategoryResponse> = state
        .content
        .list_categories()
        .await?
        .into_iter()
        .map(|c| CategoryResponse {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<NameRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .content
        .create_category(&request_id.context(), &body.name)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(CategoryResponse {
        id: category.id,
        name: category.name,
    })))
}

/// GET /api/tags
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags: Vec<TagResponse> = state
        .content
        .list_tags()
        .await?
        .into_iter()
        .map(|t| TagResponse {
            id: t.id,
            name: t.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<NameRequest>,
) -> AppResult<HttpResponse> {
    let tag = state
        .content
        .create_tag(&request_id.context(), &body.name)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(TagResponse {
        id: tag.id,
        name: tag.name,
    })))
}
