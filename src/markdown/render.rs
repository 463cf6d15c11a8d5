//! Inline span to render node mapping.

use super::inline::{InlineSpan, SpanKind, tokenize};
use super::node::{Attrs, RenderNode};
use super::MarkdownError;

/// Map one inline span to a leaf node.
///
/// | Kind   | Node                                   |
/// |--------|----------------------------------------|
/// | Plain  | raw text                               |
/// | Bold   | `<b>text</b>`                          |
/// | Italic | `<i>text</i>`                          |
/// | Code   | `<code>text</code>`                    |
/// | Link   | `<a href="url">text</a>`               |
/// | Image  | `<img src="url" alt="text"></img>`     |
pub fn render_span(span: InlineSpan) -> Result<RenderNode, MarkdownError> {
    let (text, kind, url) = span.into_parts();
    let url = match url {
        Some(url) => url,
        None if kind.takes_url() => return Err(MarkdownError::MissingUrl { kind, text }),
        None => String::new(),
    };
    let node = match kind {
        SpanKind::Plain => RenderNode::text(text),
        SpanKind::Bold => RenderNode::leaf("b", text),
        SpanKind::Italic => RenderNode::leaf("i", text),
        SpanKind::Code => RenderNode::leaf("code", text),
        SpanKind::Link => {
            RenderNode::leaf("a", text).with_attrs([("href", url)].into_iter().collect())
        }
        SpanKind::Image => {
            let attrs: Attrs = [("src", url), ("alt", text)].into_iter().collect();
            RenderNode::leaf("img", "").with_attrs(attrs)
        }
    };
    Ok(node)
}

/// Tokenize inline markdown and render every span.
pub fn inline_children(text: &str) -> Result<Vec<RenderNode>, MarkdownError> {
    tokenize(text)?.into_iter().map(render_span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(span: InlineSpan) -> String {
        render_span(span).unwrap().to_html().unwrap()
    }

    #[test]
    fn test_simple_kinds() {
        assert_eq!(html(InlineSpan::plain("This is a text node")), "This is a text node");
        assert_eq!(html(InlineSpan::new(SpanKind::Bold, "bold")), "<b>bold</b>");
        assert_eq!(html(InlineSpan::new(SpanKind::Italic, "it")), "<i>it</i>");
        assert_eq!(html(InlineSpan::new(SpanKind::Code, "x = 1")), "<code>x = 1</code>");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            html(InlineSpan::link("Click me", "https://boot.dev")),
            r#"<a href="https://boot.dev">Click me</a>"#
        );
    }

    #[test]
    fn test_image() {
        let node = render_span(InlineSpan::image("alt text", "img.png")).unwrap();
        assert_eq!(node.tag(), Some("img"));
        assert_eq!(node.attrs().get("src"), Some("img.png"));
        assert_eq!(node.attrs().get("alt"), Some("alt text"));
        assert_eq!(
            node.to_html().unwrap(),
            r#"<img src="img.png" alt="alt text"></img>"#
        );
    }

    #[test]
    fn test_missing_url() {
        let err = render_span(InlineSpan::new(SpanKind::Image, "alt")).unwrap_err();
        assert_eq!(
            err,
            MarkdownError::MissingUrl {
                kind: SpanKind::Image,
                text: "alt".to_string()
            }
        );

        let err = render_span(InlineSpan::new(SpanKind::Link, "anchor")).unwrap_err();
        assert!(matches!(err, MarkdownError::MissingUrl { kind: SpanKind::Link, .. }));
    }

    #[test]
    fn test_inline_children() {
        let nodes = inline_children("a **b** [c](d)").unwrap();
        let rendered: Vec<String> = nodes.iter().map(|n| n.to_html().unwrap()).collect();
        assert_eq!(rendered, vec!["a ", "<b>b</b>", " ", r#"<a href="d">c</a>"#]);
    }
}
