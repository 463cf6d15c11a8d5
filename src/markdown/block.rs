//! Block segmentation and classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Fence marking the start and end of a code block.
pub const CODE_FENCE: &str = "```";

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6} ").expect("valid heading regex"));

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a document into trimmed, non-empty blocks separated by blank lines.
///
/// Runs of three or more newlines act as a single separator.
pub fn segment(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a trimmed block. Total: anything unrecognized is a paragraph.
///
/// Rules are checked in priority order: heading, code, quote, unordered list,
/// ordered list.
pub fn classify(block: &str) -> BlockType {
    if HEADING_RE.is_match(block) {
        return BlockType::Heading;
    }
    if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        return BlockType::Code;
    }

    let lines = || block.split('\n');
    if lines().all(|line| line.starts_with('>')) {
        BlockType::Quote
    } else if lines().all(|line| line.starts_with("* ") || line.starts_with("- ")) {
        BlockType::UnorderedList
    } else if lines().zip(1usize..).all(|(line, n)| is_numbered(line, n)) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Line starts with `{n}. `.
fn is_numbered(line: &str, n: usize) -> bool {
    line.strip_prefix(n.to_string().as_str())
        .is_some_and(|rest| rest.starts_with(". "))
}
