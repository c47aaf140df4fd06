//! Plain-text helpers used when deriving fields from rendered markup.

/// Marker appended to a derived excerpt.
pub const ELLIPSIS: &str = "...";

/// Remove every HTML tag and comment from `html`, keeping the text between.
///
/// A `>` inside a quoted attribute value does not end the tag. Quotes only
/// open a value right after `=`; a stray quote elsewhere is plain text. An
/// unclosed tag or comment swallows the rest of the input.
///
/// ```
/// use blog_core::text::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
/// assert_eq!(strip_tags(r#"<a title="x>y">Link</a>"#), "Link");
/// ```
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        result.push_str(&rest[..start]);
        rest = &rest[start..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            match comment.find("-->") {
                Some(end) => rest = &comment[end + 3..],
                None => return result,
            }
            continue;
        }

        let mut quote: Option<char> = None;
        let mut after_eq = false;
        let mut end = None;
        for (i, ch) in rest.char_indices().skip(1) {
            match (ch, quote) {
                (c, Some(q)) if c == q => quote = None,
                (_, Some(_)) => {}
                ('"' | '\'', None) if after_eq => {
                    quote = Some(ch);
                    after_eq = false;
                }
                ('>', None) => {
                    end = Some(i);
                    break;
                }
                ('=', None) => after_eq = true,
                (c, None) if c.is_whitespace() => {}
                _ => after_eq = false,
            }
        }
        match end {
            Some(i) => rest = &rest[i + 1..],
            None => return result,
        }
    }

    result.push_str(rest);
    result
}

/// First whitespace-delimited word of the text content of `html`, followed
/// by [`ELLIPSIS`]. `None` when the markup carries no text at all.
///
/// The word is kept whole; length limits are the caller's to enforce.
pub fn excerpt_from_html(html: &str) -> Option<String> {
    let plain = strip_tags(html);
    let word = plain.split_whitespace().next()?;
    Some(format!("{word}{ELLIPSIS}"))
}
