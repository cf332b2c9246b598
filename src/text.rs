//! Whitespace normalization.
//!
//! One algorithm serves both isolated text-node content and whole serialized
//! markup strings:
//!
//! 1. Leading and trailing ASCII whitespace is trimmed.
//! 2. Non-whitespace characters are copied verbatim, in order.
//! 3. A whitespace run that sits strictly between `>` and `<` is dropped
//!    (inter-element whitespace). Any other run collapses to a single
//!    character: `\n` when newlines are kept and the run contained one,
//!    otherwise a space.

use crate::dom::DomTree;
use crate::error::Result;

/// Byte class used for run detection.
#[inline]
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

#[inline]
fn is_space_char(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Whether a string is empty or made only of ASCII whitespace.
#[inline]
#[must_use]
pub fn is_whitespace_only(text: &str) -> bool {
    text.bytes().all(is_space)
}

/// The single character a whitespace run collapses to.
#[inline]
fn separator(run: &str, keep_new_lines: bool) -> char {
    if keep_new_lines && run.contains('\n') {
        '\n'
    } else {
        ' '
    }
}

/// Collapse and trim whitespace.
///
/// # Examples
///
/// ```
/// use rs_domclean::normalize_whitespace;
///
/// let text = normalize_whitespace("  Hello   \t  World!  \n\n  ", false)?;
/// assert_eq!(text, "Hello World!");
///
/// let text = normalize_whitespace("Hello\n\nWorld\nTest", true)?;
/// assert_eq!(text, "Hello\nWorld\nTest");
///
/// let markup = normalize_whitespace("<div>   <p>a  b</p>\n</div>", true)?;
/// assert_eq!(markup, "<div><p>a b</p></div>");
/// # Ok::<(), rs_domclean::Error>(())
/// ```
///
/// # Errors
///
/// Returns `Error::Allocation` if the output buffer cannot be reserved.
pub fn normalize_whitespace(text: &str, keep_new_lines: bool) -> Result<String> {
    normalize_with_boundaries(text, keep_new_lines, false, false)
}

/// Normalize text-node content, optionally keeping one separator at either
/// edge.
///
/// `keep_leading` / `keep_trailing` retain a single collapsed character for
/// an edge that had whitespace, used when that edge touches a sibling node.
/// Whitespace-only input always normalizes to the empty string.
pub(crate) fn normalize_with_boundaries(
    text: &str,
    keep_new_lines: bool,
    keep_leading: bool,
    keep_trailing: bool,
) -> Result<String> {
    let trimmed = text.trim_matches(is_space_char);
    let mut out = String::new();
    if trimmed.is_empty() {
        return Ok(out);
    }

    // Output never exceeds trimmed length plus the two edge separators.
    out.try_reserve_exact(trimmed.len() + 2)?;

    let leading = &text[..text.len() - text.trim_start_matches(is_space_char).len()];
    if keep_leading && !leading.is_empty() {
        out.push(separator(leading, keep_new_lines));
    }

    collapse_into(trimmed, keep_new_lines, &mut out);

    let trailing = &text[text.trim_end_matches(is_space_char).len()..];
    if keep_trailing && !trailing.is_empty() {
        out.push(separator(trailing, keep_new_lines));
    }

    Ok(out)
}

/// Collapse interior runs of an already-trimmed string into `out`.
fn collapse_into(trimmed: &str, keep_new_lines: bool, out: &mut String) {
    let bytes = trimmed.as_bytes();
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !is_space(bytes[i]) {
            i += 1;
            continue;
        }

        // Whitespace bytes are ASCII, so every index here is a char boundary.
        out.push_str(&trimmed[segment_start..i]);

        let run_start = i;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }

        let between_tags =
            run_start > 0 && bytes[run_start - 1] == b'>' && bytes.get(i) == Some(&b'<');
        if !between_tags {
            out.push(separator(&trimmed[run_start..i], keep_new_lines));
        }

        segment_start = i;
    }

    out.push_str(&trimmed[segment_start..]);
}

/// Serialize a subtree and normalize the resulting markup.
///
/// # Errors
///
/// Returns `Error::Allocation` if the output buffer cannot be reserved.
pub fn normalize_markup<D: DomTree>(dom: &D, node: D::Node, keep_new_lines: bool) -> Result<String> {
    normalize_whitespace(&dom.serialize(node), keep_new_lines)
}
