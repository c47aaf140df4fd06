//! # Blog Core
//!
//! The domain layer of the blog service.
//! Content model, view layer and the ports they talk to. No infrastructure
//! dependencies live here.

pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod text;

pub use context::RequestContext;
pub use error::{DomainError, RepoError};
