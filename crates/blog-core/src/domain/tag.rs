use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_text;
use crate::error::DomainError;

pub const TAG_NAME_MAX_LEN: usize = 100;

/// A tag shared between any number of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match check_text("name", &self.name, TAG_NAME_MAX_LEN) {
            Some(message) => Err(DomainError::invalid(message)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
