//! Context classification and output escaping.
//!
//! Two distinct tag sets decide how a text node is treated:
//!
//! - [`RawTextTag`]: elements whose direct text children keep their
//!   whitespace and are never removed for emptiness.
//! - [`NoEscapeTag`]: elements whose text children are written out without
//!   entity escaping.
//!
//! They overlap (`script`, `style`) but are not the same set.

use crate::dom::{DomTree, NodeKind};
use crate::error::Result;

/// Elements whose direct text children are exempt from whitespace
/// normalization and emptiness removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawTextTag {
    Pre,
    Code,
    Script,
    Style,
    Textarea,
}

impl RawTextTag {
    /// Look up a tag name, ASCII case-insensitively.
    #[must_use]
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pre" => Some(Self::Pre),
            "code" => Some(Self::Code),
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }
}

/// Elements whose text children bypass entity escaping on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoEscapeTag {
    Script,
    Style,
    Xmp,
    Iframe,
    Noembed,
    Noframes,
    Plaintext,
}

impl NoEscapeTag {
    /// Look up a tag name, ASCII case-insensitively.
    #[must_use]
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            "xmp" => Some(Self::Xmp),
            "iframe" => Some(Self::Iframe),
            "noembed" => Some(Self::Noembed),
            "noframes" => Some(Self::Noframes),
            "plaintext" => Some(Self::Plaintext),
            _ => None,
        }
    }
}

fn parent_tag<D: DomTree>(dom: &D, node: D::Node) -> Option<String> {
    let parent = dom.parent(node)?;
    if dom.kind(parent) != NodeKind::Element {
        return None;
    }
    dom.tag_name(parent)
}

/// Whether a node's parent is a whitespace-preserving raw-text element.
#[must_use]
pub fn is_raw_text_context<D: DomTree>(dom: &D, node: D::Node) -> bool {
    parent_tag(dom, node).is_some_and(|tag| RawTextTag::from_tag_name(&tag).is_some())
}

/// Whether a node's parent suppresses entity escaping.
#[must_use]
pub fn is_no_escape_context<D: DomTree>(dom: &D, node: D::Node) -> bool {
    parent_tag(dom, node).is_some_and(|tag| NoEscapeTag::from_tag_name(&tag).is_some())
}

/// Length in bytes of the leading run of space, tab, CR and LF.
#[must_use]
pub fn leading_whitespace_size(text: &str) -> usize {
    text.bytes()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count()
}

/// Entity-escape `< > & " '` into `out`.
pub(crate) fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Escape text for output, keeping leading whitespace verbatim.
///
/// # Examples
///
/// ```
/// use rs_domclean::escape_smart;
///
/// assert_eq!(escape_smart("  a < b")?, "  a &lt; b");
/// assert_eq!(escape_smart("Tom & \"Jerry's\"")?, "Tom &amp; &quot;Jerry&#39;s&quot;");
/// # Ok::<(), rs_domclean::Error>(())
/// ```
///
/// # Errors
///
/// Returns `Error::Allocation` if the output buffer cannot be reserved.
pub fn escape_smart(text: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve(text.len() + text.len() / 4)?;

    let prefix = leading_whitespace_size(text);
    out.push_str(&text[..prefix]);
    escape_into(&text[prefix..], &mut out);
    Ok(out)
}

/// Output form of a text node: verbatim under a no-escape parent,
/// [`escape_smart`] otherwise. Empty text yields an empty string.
///
/// # Errors
///
/// Returns `Error::Allocation` if the output buffer cannot be reserved.
pub fn escape_text_node<D: DomTree>(dom: &D, node: D::Node) -> Result<String> {
    let Some(text) = dom.text(node) else {
        return Ok(String::new());
    };

    if is_no_escape_context(dom, node) {
        Ok(text)
    } else {
        escape_smart(&text)
    }
}
