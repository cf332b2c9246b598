//! Attribute normalization.
//!
//! Parsers recovering from sloppy markup can leave stray whitespace around
//! attribute names and values. The element's attributes are rebuilt with
//! names and values trimmed; an attribute whose trimmed name is empty is
//! dropped.

use crate::dom::DomTree;
use crate::error::Result;

#[inline]
fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Rebuild an element's attributes with trimmed names and values.
///
/// Every attribute is removed and the survivors are re-added in their
/// original order, so the engine never has to rewrite a key in place.
/// Whitespace inside a value is left alone. If two names trim to the same
/// key, the later value wins and the earlier position is kept.
///
/// Returns the number of attributes the element carries afterwards.
///
/// # Errors
///
/// Returns `Error::Allocation` if the attribute snapshot cannot be reserved.
pub fn normalize_attributes<D: DomTree>(dom: &mut D, element: D::Node) -> Result<usize> {
    Ok(rebuild_attributes(dom, element)?.kept)
}

/// Outcome of one attribute rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AttributeCounts {
    /// Attributes on the element afterwards.
    pub kept: usize,
    /// Attributes dropped for an empty trimmed name.
    pub dropped: usize,
}

pub(crate) fn rebuild_attributes<D: DomTree>(
    dom: &mut D,
    element: D::Node,
) -> Result<AttributeCounts> {
    if !dom.has_any_attribute(element) {
        return Ok(AttributeCounts::default());
    }

    let original = dom.attributes(element);
    let mut rebuilt: Vec<(&str, &str)> = Vec::new();
    rebuilt.try_reserve_exact(original.len())?;
    let mut counts = AttributeCounts::default();

    for (name, value) in &original {
        dom.remove_attribute(element, name);

        let name = trim_ascii(name);
        if name.is_empty() {
            log::trace!("dropping attribute with empty name (value {value:?})");
            counts.dropped += 1;
            continue;
        }
        rebuilt.push((name, trim_ascii(value)));
    }

    for (i, (name, value)) in rebuilt.iter().enumerate() {
        dom.set_attribute(element, name, value);
        // Names that trim to the same key collapse into one attribute.
        if !rebuilt[..i].iter().any(|(seen, _)| seen == name) {
            counts.kept += 1;
        }
    }

    Ok(counts)
}
