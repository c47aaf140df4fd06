//! Content model and view layer driven against the in-memory store and the
//! real markdown renderer.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use blog_core::domain::{Category, Comment, CommentForm, PostDraft, User};
use blog_core::ports::UrlResolver;
use blog_core::services::{BlogViews, PostService, Repositories};
use blog_core::{DomainError, RequestContext};
use blog_infra::{InMemoryStore, MarkdownRenderer};

struct TestUrls;

impl UrlResolver for TestUrls {
    fn post_detail(&self, id: Uuid) -> String {
        format!("/posts/{id}")
    }
}

struct Fixture {
    store: Arc<InMemoryStore>,
    service: Arc<PostService>,
    views: BlogViews,
    ctx: RequestContext,
    category: Category,
    author: User,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let repos = Repositories {
        posts: store.clone(),
        categories: store.clone(),
        tags: store.clone(),
        users: store.clone(),
        comments: store.clone(),
    };
    let markup = Arc::new(MarkdownRenderer::new());
    let service = Arc::new(PostService::new(repos, markup.clone(), Arc::new(TestUrls)));
    let views = BlogViews::new(service.clone(), markup);
    let ctx = RequestContext::new("test-request");

    let category = service.create_category(&ctx, "Rust").await.unwrap();
    let author = service
        .create_author(&ctx, "ada", "ada@example.com")
        .await
        .unwrap();

    Fixture {
        store,
        service,
        views,
        ctx,
        category,
        author,
    }
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap()
}

impl Fixture {
    fn draft(&self, title: &str, body: &str, created: DateTime<Utc>) -> PostDraft {
        PostDraft {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            created_time: Some(created),
            modified_time: Some(created),
            category_id: Some(self.category.id),
            author_id: Some(self.author.id),
            ..Default::default()
        }
    }

    async fn publish(&self, title: &str, created: DateTime<Utc>) -> Uuid {
        let draft = self.draft(title, "Some body text", created);
        self.service.save(&self.ctx, draft).await.unwrap().id
    }
}

#[tokio::test]
async fn test_empty_excerpt_is_first_rendered_word() {
    let f = fixture().await;
    let draft = f.draft("Hi", "# Hello world this is a test", at(2023, 1, 1));

    let post = f.service.save(&f.ctx, draft).await.unwrap();
    assert_eq!(post.excerpt, "Hello...");
}

#[tokio::test]
async fn test_excerpt_ignores_markup() {
    let f = fixture().await;
    let draft = f.draft("Hi", "**Bold** start\n\nmore", at(2023, 1, 1));

    let post = f.service.save(&f.ctx, draft).await.unwrap();
    assert_eq!(post.excerpt, "Bold...");
}

#[tokio::test]
async fn test_supplied_excerpt_is_kept() {
    let f = fixture().await;
    let draft = PostDraft {
        excerpt: Some("Hand written summary".to_string()),
        ..f.draft("Hi", "# Hello", at(2023, 1, 1))
    };

    let post = f.service.save(&f.ctx, draft).await.unwrap();
    assert_eq!(post.excerpt, "Hand written summary");
}

#[tokio::test]
async fn test_body_without_text_is_rejected() {
    let f = fixture().await;
    let draft = f.draft("Hi", "<!-- only a comment -->", at(2023, 1, 1));

    let result = f.service.save(&f.ctx, draft).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_overlong_first_word_is_rejected_not_cut() {
    let f = fixture().await;
    let draft = f.draft("Hi", &"a".repeat(250), at(2023, 1, 1));

    match f.service.save(&f.ctx, draft).await {
        Err(DomainError::Validation(errors)) => {
            assert_eq!(errors, vec!["excerpt must be at most 200 characters"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    let listed = f.views.list_all(&f.ctx).await.unwrap();
    assert!(listed.post_list.is_empty());
}

#[tokio::test]
async fn test_first_word_at_limit_is_kept_whole() {
    let f = fixture().await;
    let word = "b".repeat(197);
    let draft = f.draft("Hi", &word, at(2023, 1, 1));

    let post = f.service.save(&f.ctx, draft).await.unwrap();
    assert_eq!(post.excerpt, format!("{word}..."));
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let f = fixture().await;
    let draft = PostDraft {
        title: Some("Only a title".to_string()),
        ..Default::default()
    };

    match f.service.save(&f.ctx, draft).await {
        Err(DomainError::Validation(errors)) => assert_eq!(errors.len(), 5),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_overlong_title_and_excerpt_rejected() {
    let f = fixture().await;
    let draft = PostDraft {
        excerpt: Some("e".repeat(201)),
        ..f.draft(&"t".repeat(71), "body", at(2023, 1, 1))
    };

    match f.service.save(&f.ctx, draft).await {
        Err(DomainError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dangling_references_rejected() {
    let f = fixture().await;
    let draft = PostDraft {
        category_id: Some(Uuid::new_v4()),
        tag_ids: vec![Uuid::new_v4()],
        ..f.draft("Hi", "body", at(2023, 1, 1))
    };

    match f.service.save(&f.ctx, draft).await {
        Err(DomainError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].starts_with("category"));
            assert!(errors[1].starts_with("tag"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let f = fixture().await;
    let draft = PostDraft {
        id: Some(Uuid::new_v4()),
        ..f.draft("Hi", "body", at(2023, 1, 1))
    };

    let err = f.service.save(&f.ctx, draft).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_keeps_view_counter_and_tags() {
    let f = fixture().await;
    let tag = f.service.create_tag(&f.ctx, "async").await.unwrap();
    let id = f.publish("First", at(2023, 1, 1)).await;
    f.service.increase_views(&f.ctx, id).await.unwrap();
    f.service.increase_views(&f.ctx, id).await.unwrap();

    let draft = PostDraft {
        id: Some(id),
        tag_ids: vec![tag.id, tag.id],
        ..f.draft("Renamed", "New body", at(2023, 1, 1))
    };
    let post = f.service.save(&f.ctx, draft).await.unwrap();

    assert_eq!(post.title, "Renamed");
    assert_eq!(post.views, 2);
    assert_eq!(post.tag_ids, vec![tag.id]);
    assert_eq!(post.excerpt, "New...");
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let f = fixture().await;
    let middle = f.publish("b", at(2023, 2, 1)).await;
    let oldest = f.publish("a", at(2022, 12, 31)).await;
    let newest = f.publish("c", at(2023, 3, 9)).await;

    let ctx = f.views.list_all(&f.ctx).await.unwrap();
    let ids: Vec<Uuid> = ctx.post_list.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
}

#[tokio::test]
async fn test_archive_selects_exact_month() {
    let f = fixture().await;
    let january = f.publish("jan", at(2023, 1, 15)).await;
    f.publish("feb", at(2023, 2, 1)).await;
    f.publish("last year", at(2022, 1, 20)).await;

    let ctx = f.views.archive(&f.ctx, 2023, 1).await.unwrap();
    let ids: Vec<Uuid> = ctx.post_list.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![january]);
}

#[tokio::test]
async fn test_archive_rejects_invalid_month() {
    let f = fixture().await;
    let result = f.views.archive(&f.ctx, 2023, 13).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_by_category() {
    let f = fixture().await;
    let empty = f.service.create_category(&f.ctx, "Empty").await.unwrap();
    let first = f.publish("one", at(2023, 1, 1)).await;
    let second = f.publish("two", at(2023, 1, 2)).await;

    let ctx = f.views.by_category(&f.ctx, f.category.id).await.unwrap();
    let ids: Vec<Uuid> = ctx.post_list.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![second, first]);

    let ctx = f.views.by_category(&f.ctx, empty.id).await.unwrap();
    assert!(ctx.post_list.is_empty());
}

#[tokio::test]
async fn test_by_unknown_category_is_not_found() {
    let f = fixture().await;
    let err = f.views.by_category(&f.ctx, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Category",
            ..
        }
    ));
}

#[tokio::test]
async fn test_detail_renders_and_counts() {
    let f = fixture().await;
    let draft = f.draft("Doc", "## Setup\n\n```sh\ncargo run\n```\n", at(2023, 1, 1));
    let id = f.service.save(&f.ctx, draft).await.unwrap().id;
    f.store
        .add_comment(Comment::new(
            id,
            "reader".into(),
            "r@example.com".into(),
            "Nice".into(),
        ))
        .await
        .unwrap();

    let first = f.views.detail(&f.ctx, id).await.unwrap();
    assert_eq!(first.post.views, 1);
    assert!(first.post.body.contains("<h2 id=\"setup\">Setup</h2>"));
    assert!(first.post.body.contains("codehilite"));
    assert_eq!(first.form, CommentForm::default());
    assert_eq!(first.comment_list.len(), 1);

    let second = f.views.detail(&f.ctx, id).await.unwrap();
    assert_eq!(second.post.views, 2);

    let listed = f.views.list_all(&f.ctx).await.unwrap();
    assert_eq!(listed.post_list[0].comment_count, 1);
    assert_eq!(listed.post_list[0].post.views, 2);
    assert_eq!(listed.post_list[0].post.body, "## Setup\n\n```sh\ncargo run\n```\n");
}

#[tokio::test]
async fn test_detail_unknown_post_is_not_found() {
    let f = fixture().await;
    let err = f.views.detail(&f.ctx, Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_increase_views_sequential() {
    let f = fixture().await;
    let id = f.publish("p", at(2023, 1, 1)).await;
    for _ in 0..5 {
        f.service.increase_views(&f.ctx, id).await.unwrap();
    }

    let ctx = f.views.list_all(&f.ctx).await.unwrap();
    assert_eq!(ctx.post_list[0].post.views, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_increase_views_concurrent() {
    let f = fixture().await;
    let id = f.publish("p", at(2023, 1, 1)).await;

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = f.service.clone();
            let ctx = f.ctx.clone();
            tokio::spawn(async move { service.increase_views(&ctx, id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let ctx = f.views.list_all(&f.ctx).await.unwrap();
    assert_eq!(ctx.post_list[0].post.views, 50);
}

#[tokio::test]
async fn test_increase_views_unknown_post() {
    let f = fixture().await;
    let err = f
        .service
        .increase_views(&f.ctx, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_canonical_url() {
    let f = fixture().await;
    let id = f.publish("p", at(2023, 1, 1)).await;
    let post = f.views.list_all(&f.ctx).await.unwrap().post_list[0]
        .post
        .clone();
    assert_eq!(f.service.canonical_url(&post), format!("/posts/{id}"));
}

#[tokio::test]
async fn test_categories_and_tags_listed_by_name() {
    let f = fixture().await;
    f.service.create_category(&f.ctx, "Databases").await.unwrap();
    f.service.create_tag(&f.ctx, "zig").await.unwrap();
    f.service.create_tag(&f.ctx, "actix").await.unwrap();

    let categories: Vec<String> = f
        .service
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(categories, vec!["Databases", "Rust"]);

    let tags: Vec<String> = f
        .service
        .list_tags()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(tags, vec!["actix", "zig"]);
}

#[tokio::test]
async fn test_blank_category_name_rejected() {
    let f = fixture().await;
    let result = f.service.create_category(&f.ctx, "   ").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_duplicate_author_rejected() {
    let f = fixture().await;
    let result = f.service.create_author(&f.ctx, "ada", "x@example.com").await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}
