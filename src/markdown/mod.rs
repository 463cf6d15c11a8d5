//! Markdown to html conversion.
//!
//! Pure text-in, text-out pipeline with no I/O:
//!
//! ```text
//! document ─► segment ─► classify ─► build ─► assemble ─► to_html
//!                                      │
//!                        text ─► tokenize ─► render_span
//! ```
//!
//! - [`inline`] - inline span tokenizer
//! - [`render`] - inline span to render node
//! - [`block`] - block segmentation and classification
//! - [`tree`] - block subtrees and document assembly
//! - [`node`] - render tree and serialization
//!
//! Supported syntax is deliberately small: `**bold**`, `*italic*`, `_italic_`,
//! `` `code` ``, `![alt](url)`, `[text](url)`, `#`..`######` headings,
//! fenced code, `>` quotes, `*`/`-` lists and `1.` ordered lists.

pub mod block;
mod error;
pub mod inline;
pub mod node;
pub mod render;
mod title;
pub mod tree;

pub use error::{MarkdownError, RenderError, TitleError};
pub use title::extract_title;
pub use tree::assemble;

/// Convert a markdown document into its html body.
///
/// # Example
/// ```ignore
/// assert_eq!(markdown_to_html("# Title")?, "<div><h1>Title</h1></div>");
/// ```
pub fn markdown_to_html(document: &str) -> Result<String, MarkdownError> {
    Ok(assemble(document)?.to_html()?)
}
