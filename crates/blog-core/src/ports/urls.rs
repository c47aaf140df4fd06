use uuid::Uuid;

/// Maps domain objects to the paths the routing layer serves them at.
pub trait UrlResolver: Send + Sync {
    fn post_detail(&self, id: Uuid) -> String;
}
