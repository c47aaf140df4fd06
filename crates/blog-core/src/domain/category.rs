use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_text;
use crate::error::DomainError;

pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// A post category. Every post belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    /// Create a new category with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match check_text("name", &self.name, CATEGORY_NAME_MAX_LEN) {
            Some(message) => Err(DomainError::invalid(message)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
