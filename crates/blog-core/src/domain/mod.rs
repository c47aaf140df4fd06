//! Domain entities - the core business objects.

mod category;
mod comment;
mod filter;
mod post;
mod tag;
mod user;

pub use category::{CATEGORY_NAME_MAX_LEN, Category};
pub use comment::{Comment, CommentForm};
pub use filter::PostFilter;
pub use post::{EXCERPT_MAX_LEN, Post, PostDraft, TITLE_MAX_LEN};
pub use tag::{TAG_NAME_MAX_LEN, Tag};
pub use user::User;

/// Checks a required short text field, returning a message per violation.
pub(crate) fn check_text(field: &str, value: &str, max_len: usize) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{field} is required"))
    } else if value.chars().count() > max_len {
        Some(format!("{field} must be at most {max_len} characters"))
    } else {
        None
    }
}
