//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Category, Comment, Post, PostFilter, Tag, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, TagRepository,
    UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = TagEntity::find()
            .filter(tag::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(|t| t.id).collect())
    }
}

/// Posts matching `filter`, newest first.
pub(crate) fn select_posts(filter: PostFilter) -> Result<Select<PostEntity>, RepoError> {
    let query = match filter {
        PostFilter::All => PostEntity::find(),
        PostFilter::Archive { year, month } => {
            let (start, end) = filter.created_window().ok_or_else(|| {
                RepoError::Query(format!("{year}-{month:02} is not a valid month"))
            })?;
            let start: DateTimeWithTimeZone = start.into();
            let end: DateTimeWithTimeZone = end.into();
            PostEntity::find()
                .filter(post::Column::CreatedTime.gte(start))
                .filter(post::Column::CreatedTime.lt(end))
        }
        PostFilter::Category(category_id) => {
            PostEntity::find().filter(post::Column::CategoryId.eq(category_id))
        }
    };
    Ok(query.order_by_desc(post::Column::CreatedTime))
}

/// PostgreSQL post repository. Tags are stored in `post_tags`.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    async fn attach_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let links = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(ids))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let mut by_post: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in links {
            by_post.entry(link.post_id).or_default().push(link.tag_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let tags = by_post.remove(&m.id).unwrap_or_default();
                m.into_post(tags)
            })
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => Ok(self.attach_tags(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tag_ids = post.tag_ids.clone();
        tag_ids.sort();
        tag_ids.dedup();

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let exists = PostEntity::find_by_id(post.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .is_some();
        let active_model = post::ActiveModel::from(&post);
        let model = if exists {
            active_model.update(&txn).await
        } else {
            active_model.insert(&txn).await
        }
        .map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if !tag_ids.is_empty() {
            let links = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
                post_id: Set(post.id),
                tag_id: Set(*tag_id),
            });
            PostTagEntity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into_post(tag_ids))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError> {
        let models = select_posts(filter)?
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        self.attach_tags(models).await
    }

    async fn increment_views(&self, id: Uuid, by: u32) -> Result<(), RepoError> {
        let by = i32::try_from(by).unwrap_or(i32::MAX);
        let result = PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(by))
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// PostgreSQL read side of the comment tables.
pub struct PostgresCommentRepository {
    db: Arc<DbConn>,
}

impl PostgresCommentRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedTime)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_for(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}
