//! Block to render tree conversion and document assembly.

use super::block::{BlockType, classify, segment};
use super::node::RenderNode;
use super::render::inline_children;
use super::MarkdownError;

/// Convert a whole document into a root `div` holding one subtree per block.
pub fn assemble(document: &str) -> Result<RenderNode, MarkdownError> {
    let children = segment(document)
        .into_iter()
        .map(|block| build(block, classify(block)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RenderNode::container("div", children))
}

/// Build the subtree for a single classified block.
pub fn build(block: &str, block_type: BlockType) -> Result<RenderNode, MarkdownError> {
    match block_type {
        BlockType::Heading => heading(block),
        BlockType::Paragraph => paragraph(block),
        BlockType::Code => Ok(code(block)),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => unordered_list(block),
        BlockType::OrderedList => ordered_list(block),
    }
}

fn paragraph(block: &str) -> Result<RenderNode, MarkdownError> {
    Ok(RenderNode::container("p", inline_children(block)?))
}

/// `#`..`######` followed by a space; anything else degrades to a paragraph
/// over the untouched block.
fn heading(block: &str) -> Result<RenderNode, MarkdownError> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    match block[level..].strip_prefix(' ') {
        Some(rest) if (1..=6).contains(&level) => Ok(RenderNode::container(
            format!("h{level}"),
            inline_children(rest.trim())?,
        )),
        _ => paragraph(block),
    }
}

/// Code contents are verbatim. Every leading and trailing backtick is
/// stripped, not only the three-character fence.
fn code(block: &str) -> RenderNode {
    let inner = block.trim_matches('`');
    let inner = inner.strip_prefix('\n').unwrap_or(inner);
    let inner = inner.strip_suffix('\n').unwrap_or(inner);
    RenderNode::container("pre", vec![RenderNode::leaf("code", inner)])
}

fn quote(block: &str) -> Result<RenderNode, MarkdownError> {
    let text = block
        .split('\n')
        .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(RenderNode::container("blockquote", inline_children(&text)?))
}

fn unordered_list(block: &str) -> Result<RenderNode, MarkdownError> {
    // markers are `* ` or `- `
    let items = block
        .split('\n')
        .map(|line| list_item(line.get(2..).unwrap_or_default()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RenderNode::container("ul", items))
}

fn ordered_list(block: &str) -> Result<RenderNode, MarkdownError> {
    let items = block
        .split('\n')
        .filter_map(|line| line.find(". ").map(|pos| &line[pos + 2..]))
        .map(list_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RenderNode::container("ol", items))
}

fn list_item(text: &str) -> Result<RenderNode, MarkdownError> {
    Ok(RenderNode::container("li", inline_children(text)?))
}

// ============================================================================
// tests
// ============================================================================
