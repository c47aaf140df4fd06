//! Markup rendering - markdown to HTML via pulldown-cmark.

mod markdown;

pub use markdown::MarkdownRenderer;
