//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;
mod taxonomy;

use actix_web::web;

use crate::routes::API_PREFIX;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .route("/health", web::get().to(health::health_check))
            // Views
            .route("/posts", web::get().to(posts::index))
            .route("/posts/{id}", web::get().to(posts::detail))
            .route("/archives/{year}/{month}", web::get().to(posts::archives))
            .route("/categories/{id}/posts", web::get().to(posts::category))
            // Authoring
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{id}", web::put().to(posts::update))
            .route("/categories", web::get().to(taxonomy::list_categories))
            .route("/categories", web::post().to(taxonomy::create_category))
            .route("/tags", web::get().to(taxonomy::list_tags))
            .route("/tags", web::post().to(taxonomy::create_tag))
            .route("/authors", web::post().to(authors::create)),
    );
}
