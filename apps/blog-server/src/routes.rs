//! Public paths of the API, shared by the router and URL resolution.

use blog_core::ports::UrlResolver;
use uuid::Uuid;

/// Scope every endpoint is mounted under.
pub const API_PREFIX: &str = "/api";

/// Resolves domain objects to paths served by this server.
#[derive(Debug, Clone)]
pub struct ApiUrls {
    prefix: String,
}

impl ApiUrls {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self::new(API_PREFIX)
    }
}

impl UrlResolver for ApiUrls {
    fn post_detail(&self, id: Uuid) -> String {
        format!("{}/posts/{}", self.prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_detail_path() {
        let id = Uuid::nil();
        assert_eq!(
            ApiUrls::default().post_detail(id),
            format!("/api/posts/{id}")
        );
        assert_eq!(
            ApiUrls::new("https://blog.example.com/api/").post_detail(id),
            format!("https://blog.example.com/api/posts/{id}")
        );
    }
}
