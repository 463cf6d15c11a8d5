//! Inline tokenizer.
//!
//! Turns a run of text into an ordered list of [`InlineSpan`]s. Tokenizing is a
//! fold over a fixed list of passes, applied strictly in this order:
//!
//! | Pass | Syntax         | Kind     |
//! |------|----------------|----------|
//! | 1    | `![alt](url)`  | Image    |
//! | 2    | `[text](url)`  | Link     |
//! | 3    | `**bold**`     | Bold     |
//! | 4    | `*italic*`     | Italic   |
//! | 5    | `_italic_`     | Italic   |
//! | 6    | `` `code` ``   | Code     |
//!
//! Each pass only splits spans that are still [`SpanKind::Plain`]; anything a
//! previous pass already typed flows through untouched. Emphasis does not nest.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::MarkdownError;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image regex"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));

// ============================================================================
// Span types
// ============================================================================

/// Semantic kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
        }
    }

    /// Whether spans of this kind carry a url.
    pub const fn takes_url(self) -> bool {
        matches!(self, Self::Link | Self::Image)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of text tagged with one [`SpanKind`].
///
/// `url` is only ever set for links and images. A link or image span built
/// through [`InlineSpan::new`] has no url and fails to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    kind: SpanKind,
    url: Option<String>,
}

impl InlineSpan {
    /// Create a span without a url.
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Plain, text)
    }

    /// Create a `[text](url)` span.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// Create a `![alt](url)` span.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub const fn is_plain(&self) -> bool {
        matches!(self.kind, SpanKind::Plain)
    }

    pub fn into_parts(self) -> (String, SpanKind, Option<String>) {
        (self.text, self.kind, self.url)
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// One splitting pass over the span list.
#[derive(Debug, Clone, Copy)]
enum Pass {
    Images,
    Links,
    Delimited {
        delimiter: &'static str,
        kind: SpanKind,
    },
}

const PASSES: [Pass; 6] = [
    Pass::Images,
    Pass::Links,
    Pass::Delimited {
        delimiter: "**",
        kind: SpanKind::Bold,
    },
    Pass::Delimited {
        delimiter: "*",
        kind: SpanKind::Italic,
    },
    Pass::Delimited {
        delimiter: "_",
        kind: SpanKind::Italic,
    },
    Pass::Delimited {
        delimiter: "`",
        kind: SpanKind::Code,
    },
];

/// Split raw text into typed inline spans, in left-to-right order.
///
/// Empty input yields no spans. Fails with
/// [`MarkdownError::UnmatchedDelimiter`] when a delimiter is left open.
pub fn tokenize(text: &str) -> Result<Vec<InlineSpan>, MarkdownError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    PASSES
        .iter()
        .try_fold(vec![InlineSpan::plain(text)], |spans, pass| pass.apply(spans))
}

impl Pass {
    fn apply(self, spans: Vec<InlineSpan>) -> Result<Vec<InlineSpan>, MarkdownError> {
        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
            if !span.is_plain() {
                out.push(span);
                continue;
            }
            if span.text.is_empty() {
                continue;
            }
            match self {
                Self::Images => {
                    split_markup(&span.text, find_images(&span.text), InlineSpan::image, &mut out);
                }
                Self::Links => {
                    split_markup(&span.text, find_links(&span.text), InlineSpan::link, &mut out);
                }
                Self::Delimited { delimiter, kind } => {
                    split_delimited(&span.text, delimiter, kind, &mut out)?;
                }
            }
        }
        Ok(out)
    }
}

/// A located `[label](url)` construct inside a plain span.
#[derive(Debug, PartialEq, Eq)]
struct Markup<'a> {
    range: Range<usize>,
    label: &'a str,
    url: &'a str,
}

impl<'a> Markup<'a> {
    fn from_captures(caps: &regex::Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            range: whole.range(),
            label: caps.get(1).map_or("", |m| m.as_str()),
            url: caps.get(2).map_or("", |m| m.as_str()),
        })
    }
}

fn find_images(text: &str) -> Vec<Markup<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| Markup::from_captures(&caps))
        .collect()
}

/// Find `[text](url)` occurrences whose `[` is not preceded by `!`.
fn find_links(text: &str) -> Vec<Markup<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(caps) = LINK_RE.captures_at(text, pos) {
        let Some(markup) = Markup::from_captures(&caps) else {
            break;
        };
        if text[..markup.range.start].ends_with('!') {
            // `[` is one byte, so restarting right after it stays on a char boundary
            pos = markup.range.start + 1;
            continue;
        }
        pos = markup.range.end;
        found.push(markup);
    }
    found
}

fn split_markup<'a>(
    text: &'a str,
    found: Vec<Markup<'a>>,
    make: impl Fn(&'a str, &'a str) -> InlineSpan,
    out: &mut Vec<InlineSpan>,
) {
    if found.is_empty() {
        out.push(InlineSpan::plain(text));
        return;
    }

    let mut rest = 0;
    for markup in found {
        let before = &text[rest..markup.range.start];
        if !before.is_empty() {
            out.push(InlineSpan::plain(before));
        }
        out.push(make(markup.label, markup.url));
        rest = markup.range.end;
    }

    let tail = &text[rest..];
    if !tail.is_empty() {
        out.push(InlineSpan::plain(tail));
    }
}

/// Split on every occurrence of `delimiter`.
///
/// Fragments at odd positions sit inside a delimiter pair. An empty fragment at
/// an even position that lies strictly between two delimiters (e.g. the middle
/// of `` `a``b` ``) also becomes an empty span of `kind`; empty fragments at
/// either end are dropped.
fn split_delimited(
    text: &str,
    delimiter: &'static str,
    kind: SpanKind,
    out: &mut Vec<InlineSpan>,
) -> Result<(), MarkdownError> {
    let sections: Vec<&str> = text.split(delimiter).collect();
    if sections.len() == 1 {
        out.push(InlineSpan::plain(text));
        return Ok(());
    }
    if sections.len() % 2 == 0 {
        return Err(MarkdownError::UnmatchedDelimiter {
            delimiter,
            text: text.to_string(),
        });
    }

    let last = sections.len() - 1;
    for (i, section) in sections.into_iter().enumerate() {
        let inside = i % 2 == 1;
        let between = section.is_empty() && i > 0 && i < last;
        if inside || between {
            out.push(InlineSpan::new(kind, section));
        } else if !section.is_empty() {
            out.push(InlineSpan::plain(section));
        }
    }
    Ok(())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn delimited(
        spans: Vec<InlineSpan>,
        delimiter: &'static str,
        kind: SpanKind,
    ) -> Vec<InlineSpan> {
        Pass::Delimited { delimiter, kind }.apply(spans).unwrap()
    }

    #[test]
    fn test_plain_text_is_single_span() {
        let spans = tokenize("Plain text without delimiters").unwrap();
        assert_eq!(spans, vec![InlineSpan::plain("Plain text without delimiters")]);
    }

    #[test]
    fn test_empty_text_has_no_spans() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_all_kinds() {
        let text = "This is **text** with an *italic* word and a `code block` and an \
                    ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)";
        let spans = tokenize(text).unwrap();
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("This is "),
                InlineSpan::new(SpanKind::Bold, "text"),
                InlineSpan::plain(" with an "),
                InlineSpan::new(SpanKind::Italic, "italic"),
                InlineSpan::plain(" word and a "),
                InlineSpan::new(SpanKind::Code, "code block"),
                InlineSpan::plain(" and an "),
                InlineSpan::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                InlineSpan::plain(" and a "),
                InlineSpan::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn test_underscore_italic() {
        let spans = tokenize("an _underscored_ word").unwrap();
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("an "),
                InlineSpan::new(SpanKind::Italic, "underscored"),
                InlineSpan::plain(" word"),
            ]
        );
    }

    #[test]
    fn test_typed_spans_are_not_resplit() {
        // the lone `_` sits inside an already-typed bold span
        let spans = tokenize("**a_b** done").unwrap();
        assert_eq!(
            spans,
            vec![
                InlineSpan::new(SpanKind::Bold, "a_b"),
                InlineSpan::plain(" done"),
            ]
        );

        let spans = tokenize("**bold** then `x`").unwrap();
        assert_eq!(
            spans,
            vec![
                InlineSpan::new(SpanKind::Bold, "bold"),
                InlineSpan::plain(" then "),
                InlineSpan::new(SpanKind::Code, "x"),
            ]
        );
    }

    #[test]
    fn test_link_text_is_not_parsed_for_emphasis() {
        let spans = tokenize("see [some_page](https://example.com/a_b)").unwrap();
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("see "),
                InlineSpan::link("some_page", "https://example.com/a_b"),
            ]
        );
    }

    #[test]
    fn test_split_images_keeps_surrounding_text() {
        let mut out = Vec::new();
        let text = "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)";
        split_markup(text, find_images(text), InlineSpan::image, &mut out);
        assert_eq!(
            out,
            vec![
                InlineSpan::plain("This is text with an "),
                InlineSpan::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                InlineSpan::plain(" and another "),
                InlineSpan::image("second image", "https://i.imgur.com/3elNhQu.png"),
            ]
        );
    }

    #[test]
    fn test_trailing_text_after_last_link() {
        let spans = tokenize("[a](x) tail").unwrap();
        assert_eq!(
            spans,
            vec![InlineSpan::link("a", "x"), InlineSpan::plain(" tail")]
        );
    }

    #[test]
    fn test_links_skip_image_syntax() {
        let text = "![img](a.png) and [link](b.html)";
        let links = find_links(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "link");
        assert_eq!(links[0].url, "b.html");
    }

    #[test]
    fn test_no_markup_passes_through() {
        let mut out = Vec::new();
        split_markup("nothing here", find_links("nothing here"), InlineSpan::link, &mut out);
        assert_eq!(out, vec![InlineSpan::plain("nothing here")]);
    }

    #[test]
    fn test_split_code() {
        let spans = delimited(
            vec![InlineSpan::plain("This is text with a `code block` word")],
            "`",
            SpanKind::Code,
        );
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("This is text with a "),
                InlineSpan::new(SpanKind::Code, "code block"),
                InlineSpan::plain(" word"),
            ]
        );
    }

    #[test]
    fn test_delimiter_at_edges_drops_empty_ends() {
        let spans = delimited(
            vec![InlineSpan::plain("*italic1* plain *italic2*")],
            "*",
            SpanKind::Italic,
        );
        assert_eq!(
            spans,
            vec![
                InlineSpan::new(SpanKind::Italic, "italic1"),
                InlineSpan::plain(" plain "),
                InlineSpan::new(SpanKind::Italic, "italic2"),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiter_fails() {
        let err = tokenize("Text with `unclosed code block").unwrap_err();
        assert_eq!(
            err,
            MarkdownError::UnmatchedDelimiter {
                delimiter: "`",
                text: "Text with `unclosed code block".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_code_between_delimiters() {
        let spans = delimited(
            vec![InlineSpan::plain("Text with `` empty code")],
            "`",
            SpanKind::Code,
        );
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("Text with "),
                InlineSpan::new(SpanKind::Code, ""),
                InlineSpan::plain(" empty code"),
            ]
        );
    }

    /// Quirk: an empty fragment between two adjacent delimiter pairs becomes an
    /// empty span of the pass kind, while empty fragments at either end vanish.
    #[test]
    fn test_quirk_adjacent_delimiter_pairs() {
        let spans = delimited(vec![InlineSpan::plain("`a``b`")], "`", SpanKind::Code);
        assert_eq!(
            spans,
            vec![
                InlineSpan::new(SpanKind::Code, "a"),
                InlineSpan::new(SpanKind::Code, ""),
                InlineSpan::new(SpanKind::Code, "b"),
            ]
        );

        let spans = delimited(vec![InlineSpan::plain("**bold1****bold2**")], "**", SpanKind::Bold);
        assert_eq!(
            spans,
            vec![
                InlineSpan::new(SpanKind::Bold, "bold1"),
                InlineSpan::new(SpanKind::Bold, ""),
                InlineSpan::new(SpanKind::Bold, "bold2"),
            ]
        );
    }

    #[test]
    fn test_non_plain_spans_unchanged() {
        let input = vec![
            InlineSpan::link("Link node", "https://example.com"),
            InlineSpan::new(SpanKind::Bold, "Bold *node*"),
            InlineSpan::plain("More *italic* text"),
        ];
        let spans = delimited(input, "*", SpanKind::Italic);
        assert_eq!(
            spans,
            vec![
                InlineSpan::link("Link node", "https://example.com"),
                InlineSpan::new(SpanKind::Bold, "Bold *node*"),
                InlineSpan::plain("More "),
                InlineSpan::new(SpanKind::Italic, "italic"),
                InlineSpan::plain(" text"),
            ]
        );
    }

    #[test]
    fn test_empty_plain_spans_are_dropped() {
        let spans = delimited(
            vec![InlineSpan::plain(""), InlineSpan::plain("x")],
            "`",
            SpanKind::Code,
        );
        assert_eq!(spans, vec![InlineSpan::plain("x")]);
    }

    #[test]
    fn test_span_kind_url_invariant() {
        assert!(SpanKind::Link.takes_url());
        assert!(SpanKind::Image.takes_url());
        assert!(!SpanKind::Code.takes_url());
        assert_eq!(InlineSpan::plain("x").url, None);
        assert_eq!(InlineSpan::link("x", "u").url.as_deref(), Some("u"));
    }
}
