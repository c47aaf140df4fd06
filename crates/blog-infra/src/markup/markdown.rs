use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use blog_core::ports::{MarkupExtension, MarkupRenderer};

const CODE_WRAPPER_OPEN: &str = "<div class=\"codehilite\">";
const CODE_WRAPPER_CLOSE: &str = "</div>\n";

/// CommonMark renderer with optional extensions.
///
/// * `Extra` enables tables, footnotes and `{#id .class}` heading attributes.
/// * `CodeHighlight` wraps each code block in a `codehilite` div for styling.
/// * `TableOfContents` gives every heading without an explicit id a
///   slugified, de-duplicated anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options(extensions: &[MarkupExtension]) -> Options {
        let mut options = Options::empty();
        if extensions.contains(&MarkupExtension::Extra) {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_FOOTNOTES);
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, source: &str, extensions: &[MarkupExtension]) -> String {
        let mut events: Vec<Event<'_>> =
            Parser::new_ext(source, Self::options(extensions)).collect();

        if extensions.contains(&MarkupExtension::TableOfContents) {
            anchor_headings(&mut events);
        }
        if extensions.contains(&MarkupExtension::CodeHighlight) {
            events = wrap_code_blocks(events);
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

fn anchor_headings(events: &mut [Event<'_>]) {
    let mut taken: HashSet<String> = HashSet::new();
    let mut open: Option<(usize, String)> = None;

    for idx in 0..events.len() {
        let mut closed = None;
        match &events[idx] {
            Event::Start(Tag::Heading { id: Some(id), .. }) => {
                taken.insert(id.to_string());
            }
            Event::Start(Tag::Heading { id: None, .. }) => open = Some((idx, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => closed = open.take(),
            _ => {}
        }

        if let Some((start, text)) = closed {
            let anchor = unique_anchor(&mut taken, &text);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                *id = Some(CowStr::from(anchor));
            }
        }
    }
}

/// Slug of `text`, suffixed `_1`, `_2`, ... until it is not already taken.
fn unique_anchor(taken: &mut HashSet<String>, text: &str) -> String {
    let mut base = slug::slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }
    let mut anchor = base.clone();
    let mut n = 1;
    while taken.contains(&anchor) {
        anchor = format!("{base}_{n}");
        n += 1;
    }
    taken.insert(anchor.clone());
    anchor
}

fn wrap_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                out.push(Event::Html(CowStr::Borrowed(CODE_WRAPPER_OPEN)));
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                out.push(event);
                out.push(Event::Html(CowStr::Borrowed(CODE_WRAPPER_CLOSE)));
            }
            other => out.push(other),
        }
    }
    out
}
