//! Spacing-aware node removal.
//!
//! Comments often sit between two word-bearing text nodes
//! (`Hello<!-- x -->World`). Dropping the comment alone would render as
//! `HelloWorld`, so a single space is appended to the preceding text first.

use crate::dom::{DomTree, NodeKind};
use crate::error::Result;

/// Remove a comment or whitespace-only text node, padding the preceding
/// text node with one space when the removal would glue two tokens.
///
/// The preceding sibling is padded only when all of these hold:
/// - it is a text node with non-empty content,
/// - its content does not already end in whitespace, so consecutive
///   removals (`a<!--1--><!--2-->b`) insert one space in total,
/// - something follows the removed node, so a comment in trailing
///   position leaves no surplus space.
///
/// Otherwise the node is removed as is.
///
/// Returns `true` if a space was inserted.
///
/// # Errors
///
/// Propagates `Error::Allocation` and engine `Error::Mutation` failures.
pub fn remove_with_spacing<D: DomTree>(dom: &mut D, node: D::Node) -> Result<bool> {
    debug_assert!(matches!(dom.kind(node), NodeKind::Comment | NodeKind::Text));

    let padded = match dom.prev_sibling(node) {
        Some(prev) if dom.kind(prev) == NodeKind::Text && dom.next_sibling(node).is_some() => {
            pad_trailing(dom, prev)?
        }
        _ => false,
    };

    dom.remove(node)?;
    Ok(padded)
}

fn pad_trailing<D: DomTree>(dom: &mut D, text_node: D::Node) -> Result<bool> {
    let Some(text) = dom.text(text_node) else {
        // Empty text: nothing to separate.
        return Ok(false);
    };

    if text.ends_with(|c: char| c.is_ascii_whitespace()) {
        return Ok(false);
    }

    let mut padded = String::new();
    padded.try_reserve_exact(text.len() + 1)?;
    padded.push_str(&text);
    padded.push(' ');
    dom.replace_text(text_node, &padded)?;
    Ok(true)
}
