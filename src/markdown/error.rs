//! Error types for markdown conversion.

use thiserror::Error;

use super::inline::SpanKind;

/// Errors raised while turning markdown text into html.
///
/// All of these are fatal for the document being converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    #[error("invalid markdown syntax: unmatched delimiter `{delimiter}` in text: `{text}`")]
    UnmatchedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("{kind} span `{text}` has no url")]
    MissingUrl { kind: SpanKind, text: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Render tree contract violations found during serialization.
///
/// These indicate a node was constructed incorrectly, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("render node is missing its tag")]
    MissingTag,
}

/// Errors raised by [`extract_title`](super::extract_title).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("cannot extract title from empty markdown")]
    EmptyInput,

    #[error("no `# ` heading found in markdown content")]
    NoHeadingFound,
}
