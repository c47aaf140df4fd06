use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_text;
use crate::error::DomainError;

pub const TITLE_MAX_LEN: usize = 70;
pub const EXCERPT_MAX_LEN: usize = 200;

/// Post entity - a blog article.
///
/// `body` holds markdown source. `excerpt` is filled in from the body on
/// save when left empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_time: DateTime<Utc>,
    pub modified_time: DateTime<Utc>,
    pub excerpt: String,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
    pub author_id: Uuid,
    pub views: u32,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(title: String, body: String, category_id: Uuid, author_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            created_time: now,
            modified_time: now,
            excerpt: String::new(),
            category_id,
            tag_ids: Vec::new(),
            author_id,
            views: 0,
        }
    }

    /// Length checks on the bounded text fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if let Some(message) = check_text("title", &self.title, TITLE_MAX_LEN) {
            errors.push(message);
        }
        if self.excerpt.chars().count() > EXCERPT_MAX_LEN {
            errors.push(format!(
                "excerpt must be at most {EXCERPT_MAX_LEN} characters"
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Unvalidated post input as it arrives from an authoring client.
///
/// Every field that a [`Post`] requires is optional here so that missing
/// values can be reported together instead of failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDraft {
    pub id: Option<Uuid>,
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

impl PostDraft {
    /// Turn the draft into a post, failing if any required field is absent.
    pub fn into_post(self) -> Result<Post, DomainError> {
        let mut missing = Vec::new();
        let title = self.title.filter(|t| !t.trim().is_empty());
        let body = self.body.filter(|b| !b.trim().is_empty());

        if title.is_none() {
            missing.push("title is required".to_string());
        }
        if body.is_none() {
            missing.push("body is required".to_string());
        }
        if self.created_time.is_none() {
            missing.push("created_time is required".to_string());
        }
        if self.modified_time.is_none() {
            missing.push("modified_time is required".to_string());
        }
        if self.category_id.is_none() {
            missing.push("category is required".to_string());
        }
        if self.author_id.is_none() {
            missing.push("author is required".to_string());
        }

        match (
            title,
            body,
            self.created_time,
            self.modified_time,
            self.category_id,
            self.author_id,
        ) {
            (
                Some(title),
                Some(body),
                Some(created_time),
                Some(modified_time),
                Some(category_id),
                Some(author_id),
            ) => Ok(Post {
                id: self.id.unwrap_or_else(Uuid::new_v4),
                title,
                body,
                created_time,
                modified_time,
                excerpt: self.excerpt.unwrap_or_default(),
                category_id,
                tag_ids: self.tag_ids,
                author_id,
                views: 0,
            }),
            _ => Err(DomainError::Validation(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> PostDraft {
        let now = Utc::now();
        PostDraft {
            title: Some("Hello".to_string()),
            body: Some("Some *markdown*".to_string()),
            created_time: Some(now),
            modified_time: Some(now),
            category_id: Some(Uuid::new_v4()),
            author_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_becomes_post() {
        let post = complete_draft().into_post().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.views, 0);
        assert!(post.excerpt.is_empty());
    }

    #[test]
    fn test_draft_keeps_explicit_id() {
        let id = Uuid::new_v4();
        let draft = PostDraft {
            id: Some(id),
            ..complete_draft()
        };
        assert_eq!(draft.into_post().unwrap().id, id);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let draft = PostDraft {
            title: Some("   ".to_string()),
            category_id: None,
            author_id: None,
            ..complete_draft()
        };
        match draft.into_post() {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(
                    errors,
                    vec![
                        "title is required",
                        "category is required",
                        "author is required"
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_title_length_limit() {
        let mut post = complete_draft().into_post().unwrap();
        post.title = "x".repeat(TITLE_MAX_LEN);
        assert!(post.validate().is_ok());

        post.title = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_excerpt_length_counts_characters() {
        let mut post = complete_draft().into_post().unwrap();
        post.excerpt = "文".repeat(EXCERPT_MAX_LEN);
        assert!(post.validate().is_ok());

        post.excerpt.push('文');
        assert!(post.validate().is_err());
    }

    #[test]
    fn test_display_is_title() {
        let post = complete_draft().into_post().unwrap();
        assert_eq!(post.to_string(), "Hello");
    }
}
