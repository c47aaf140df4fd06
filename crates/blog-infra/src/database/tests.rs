use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sea_orm::{
    DatabaseBackend, DbConn, EntityTrait, MockDatabase, MockExecResult, QueryTrait, Transaction,
    Value,
};
use uuid::Uuid;

use blog_core::domain::{Category, Post, PostFilter};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository};

use crate::database::entity::{category, post, post_tag};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository, select_posts,
};

/// Statements a mock connection saw, once every repository handle is gone.
fn transaction_log(db: Arc<DbConn>) -> Vec<Transaction> {
    match Arc::try_unwrap(db) {
        Ok(db) => db.into_transaction_log(),
        Err(_) => panic!("connection still shared"),
    }
}

fn post_model(id: Uuid, category_id: Uuid, day: u32) -> post::Model {
    let created = Utc.with_ymd_and_hms(2023, 1, day, 9, 30, 0).unwrap();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        body: "# Hello".to_owned(),
        created_time: created.into(),
        modified_time: created.into(),
        excerpt: "Hello...".to_owned(),
        category_id,
        author_id: Uuid::new_v4(),
        views: 7,
    }
}

#[tokio::test]
async fn test_find_post_by_id_with_tags() {
    let post_id = Uuid::new_v4();
    let tag_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, Uuid::new_v4(), 15)]])
        .append_query_results([vec![post_tag::Model { post_id, tag_id }]])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db);
    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.views, 7);
    assert_eq!(post.tag_ids, vec![tag_id]);
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_groups_tags_per_post() {
    let category_id = Uuid::new_v4();
    let newer = Uuid::new_v4();
    let older = Uuid::new_v4();
    let tag_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(newer, category_id, 20),
            post_model(older, category_id, 2),
        ]])
        .append_query_results([vec![post_tag::Model {
            post_id: older,
            tag_id,
        }]])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list(PostFilter::Category(category_id)).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, newer);
    assert!(posts[0].tag_ids.is_empty());
    assert_eq!(posts[1].tag_ids, vec![tag_id]);
}

#[tokio::test]
async fn test_list_empty_skips_tag_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db);
    let posts = repo
        .list(PostFilter::archive(2023, 1).unwrap())
        .await
        .unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_increment_views_is_single_atomic_update() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db.clone());
    repo.increment_views(id, 1).await.unwrap();
    drop(repo);

    assert_eq!(
        transaction_log(db),
        vec![Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"UPDATE "posts" SET "views" = "views" + $1 WHERE "posts"."id" = $2"#,
            [1i32.into(), id.into()],
        )]
    );
}

#[tokio::test]
async fn test_increment_views_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresPostRepository::new(db);
    let result = repo.increment_views(Uuid::new_v4(), 1).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_category_by_id() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category::Model {
            id,
            name: "Rust".to_owned(),
        }]])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresCategoryRepository::new(db);
    let found: Option<Category> = repo.find_by_id(id).await.unwrap();
    assert_eq!(found.unwrap().name, "Rust");
}

#[tokio::test]
async fn test_comment_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[BTreeMap::from([(
            "num_items",
            Into::<Value>::into(3i64),
        )])]])
        .into_connection();
    let db = Arc::new(db);

    let repo = PostgresCommentRepository::new(db);
    assert_eq!(repo.count_for(Uuid::new_v4()).await.unwrap(), 3);
}

#[test]
fn test_archive_query_uses_half_open_month() {
    let filter = PostFilter::archive(2023, 12).unwrap();
    let sql = select_posts(filter)
        .unwrap()
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."created_time" >= '2023-12-01 00:00:00"#));
    assert!(sql.contains(r#""posts"."created_time" < '2024-01-01 00:00:00"#));
    assert!(sql.ends_with(r#"ORDER BY "posts"."created_time" DESC"#));
}

#[test]
fn test_post_writes_never_touch_views() {
    let mut post = Post::new(
        "Title".to_owned(),
        "Body".to_owned(),
        Uuid::new_v4(),
        Uuid::new_v4(),
    );
    post.views = 99;

    let update = post::Entity::update(post::ActiveModel::from(&post))
        .build(DatabaseBackend::Postgres)
        .to_string();
    assert!(update.starts_with(r#"UPDATE "posts" SET "title" = 'Title'"#));
    assert!(!update.contains(r#""views""#));

    let insert = post::Entity::insert(post::ActiveModel::from(&post))
        .build(DatabaseBackend::Postgres)
        .to_string();
    assert!(insert.starts_with(r#"INSERT INTO "posts""#));
    assert!(!insert.contains(r#""views""#));
}

#[tokio::test]
async fn test_save_replaces_tags_and_keeps_stored_views() {
    let post_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    let (first_tag, second_tag) = (Uuid::new_v4(), Uuid::new_v4());
    let stored = post_model(post_id, category_id, 15);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // existence check, UPDATE ... RETURNING, INSERT ... RETURNING
        .append_query_results([vec![stored.clone()], vec![stored.clone()]])
        .append_query_results([vec![post_tag::Model {
            post_id,
            tag_id: first_tag,
        }]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
        ])
        .into_connection();
    let db = Arc::new(db);

    let mut post = stored.into_post(Vec::new());
    post.views = 0;
    post.tag_ids = vec![second_tag, first_tag, second_tag];

    let repo = PostgresPostRepository::new(db.clone());
    let saved = repo.save(post).await.unwrap();
    drop(repo);

    let mut expected_tags = vec![first_tag, second_tag];
    expected_tags.sort();
    assert_eq!(saved.tag_ids, expected_tags);
    assert_eq!(saved.views, 7);

    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains("BEGIN"));
    assert!(log.contains("COMMIT"));
    assert!(log.contains(r#"DELETE FROM \"post_tags\""#));
    assert!(log.contains(r#"INSERT INTO \"post_tags\""#));
}
