//! Author registration.

use actix_web::{HttpResponse, web};

use blog_shared::ApiResponse;
use blog_shared::dto::{AuthorResponse, CreateAuthorRequest};

use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /api/authors
pub async fn create(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .content
        .create_author(&request_id.context(), &req.username, &req.email)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(AuthorResponse {
        id: user.id,
        username: user.username,
    })))
}
