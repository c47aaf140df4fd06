//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::MarkupRenderer;
use blog_core::services::{BlogViews, PostService, Repositories};
use blog_infra::database::{DatabaseConfig, DatabaseConnections, InMemoryStore};
use blog_infra::markup::MarkdownRenderer;

#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

use crate::routes::ApiUrls;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<PostService>,
    pub views: Arc<BlogViews>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>, auto_migrate: bool) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        if auto_migrate {
                            use migration::{Migrator, MigratorTrait};
                            if let Err(e) = Migrator::up(connections.main.as_ref(), None).await {
                                tracing::error!("Failed to apply migrations: {}", e);
                            }
                        }
                        let conn = connections.main.clone();
                        let repos = Repositories {
                            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
                            tags: Arc::new(PostgresTagRepository::new(conn.clone())),
                            users: Arc::new(PostgresUserRepository::new(conn.clone())),
                            comments: Arc::new(PostgresCommentRepository::new(conn)),
                        };
                        let db = Arc::new(connections);
                        tracing::info!("Application state initialized (postgres)");
                        return Self::from_repositories(repos, Some(db));
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = (db_config, auto_migrate);
            tracing::info!("Running without postgres feature - using in-memory store");
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// State backed by the given in-memory store.
    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        let repos = Repositories {
            posts: store.clone(),
            categories: store.clone(),
            tags: store.clone(),
            users: store.clone(),
            comments: store,
        };
        Self::from_repositories(repos, None)
    }

    fn from_repositories(repos: Repositories, db: Option<Arc<DatabaseConnections>>) -> Self {
        let markup: Arc<dyn MarkupRenderer> = Arc::new(MarkdownRenderer::new());
        let content = Arc::new(PostService::new(
            repos,
            markup.clone(),
            Arc::new(ApiUrls::default()),
        ));
        let views = Arc::new(BlogViews::new(content.clone(), markup));

        Self { content, views, db }
    }
}
