/// Optional syntax layers a markup renderer can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupExtension {
    /// Tables, footnotes and heading attributes.
    Extra,
    /// Fenced code blocks wrapped for syntax styling.
    CodeHighlight,
    /// Anchors on headings.
    TableOfContents,
}

/// Extensions used when deriving an excerpt.
pub const EXCERPT_EXTENSIONS: &[MarkupExtension] =
    &[MarkupExtension::Extra, MarkupExtension::CodeHighlight];

/// Extensions used when displaying a full post.
pub const DISPLAY_EXTENSIONS: &[MarkupExtension] = &[
    MarkupExtension::Extra,
    MarkupExtension::CodeHighlight,
    MarkupExtension::TableOfContents,
];

/// Converts post bodies to HTML. Rendering is pure and cannot fail.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, source: &str, extensions: &[MarkupExtension]) -> String;
}
