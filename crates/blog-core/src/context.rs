//! Request-scoped context passed explicitly into every service call.

use uuid::Uuid;

/// Per-request data threaded through the view layer.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context for work not tied to an inbound request (tests, seeding).
    pub fn detached() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}
