use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reader comment attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub url: String,
    pub text: String,
    pub created_time: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, name: String, email: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            url: String::new(),
            text,
            created_time: Utc::now(),
        }
    }
}

/// Unbound comment form handed to the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub url: String,
    pub text: String,
}
