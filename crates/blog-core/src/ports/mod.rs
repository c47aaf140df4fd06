//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod markup;
mod repository;
mod urls;

pub use markup::{DISPLAY_EXTENSIONS, EXCERPT_EXTENSIONS, MarkupExtension, MarkupRenderer};
pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, TagRepository,
    UserRepository,
};
pub use urls::UrlResolver;
