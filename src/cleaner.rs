//! Tree cleaning pass.
//!
//! A pre-order depth-first walk that dispatches every node by kind:
//!
//! | Node | Action |
//! |------|--------|
//! | Comment | removed with spacing when `remove_comments` |
//! | Text under `pre`/`code`/`script`/`style`/`textarea` | left alone |
//! | Whitespace-only text | removed with spacing when `remove_empty_elements` |
//! | Other text | whitespace normalized |
//! | Element | attributes normalized, then removed if empty, else descended |
//! | Document / other | descended |
//!
//! Children of a node are handled in two sweeps. The first sweep performs
//! every removal and recursion; the second normalizes the surviving text
//! children once their final siblings are known. A text edge that touches
//! a surviving sibling keeps a single separator, unless the neighboring
//! text already supplies one or is whitespace only, so the space inserted
//! by spacing-aware removal survives a second pass and the pass is
//! idempotent.

use crate::attributes::rebuild_attributes;
use crate::context::{is_raw_text_context, RawTextTag};
use crate::dom::{DomTree, NodeKind};
use crate::error::Result;
use crate::options::CleanOptions;
use crate::removal::remove_with_spacing;
use crate::text::{is_whitespace_only, normalize_with_boundaries};

/// Counters collected during a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Nodes visited, removed ones included.
    pub visited: usize,
    /// Comment nodes removed.
    pub comments_removed: usize,
    /// Whitespace-only text nodes and empty elements removed.
    pub empty_removed: usize,
    /// Separating spaces inserted by spacing-aware removal.
    pub spaces_inserted: usize,
    /// Text nodes whose content was rewritten.
    pub text_rewritten: usize,
    /// Attributes dropped for having an empty name.
    pub attributes_dropped: usize,
}

impl CleanReport {
    /// Total number of nodes removed.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.comments_removed + self.empty_removed
    }

    /// Whether the pass changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed() == 0
            && self.spaces_inserted == 0
            && self.text_rewritten == 0
            && self.attributes_dropped == 0
    }
}

/// Clean a tree in place, starting at `root`.
///
/// `root` itself is dispatched like any other node, so passing an element
/// may remove it. Pass the document root to clean a whole document.
///
/// # Errors
///
/// Returns the first allocation or mutation failure. The pass is not
/// transactional: nodes visited before the failure stay cleaned.
pub fn clean<D: DomTree>(dom: &mut D, root: D::Node, options: &CleanOptions) -> Result<CleanReport> {
    let mut cleaner = TreeCleaner::new(options);
    let removed = cleaner.visit(dom, root)?;

    // Text is normalized from its parent's second sweep; a text root has
    // no parent sweep of its own.
    if !removed && dom.kind(root) == NodeKind::Text && !is_raw_text_context(dom, root) {
        cleaner.normalize_text(dom, root)?;
    }

    let report = cleaner.report;
    log::debug!(
        "clean pass: visited {} nodes, removed {} comments and {} empty nodes, \
         inserted {} spaces, rewrote {} text nodes, dropped {} attributes",
        report.visited,
        report.comments_removed,
        report.empty_removed,
        report.spaces_inserted,
        report.text_rewritten,
        report.attributes_dropped,
    );
    Ok(report)
}

/// Walk state for one pass.
struct TreeCleaner<'o> {
    options: &'o CleanOptions,
    report: CleanReport,
}

impl<'o> TreeCleaner<'o> {
    fn new(options: &'o CleanOptions) -> Self {
        Self {
            options,
            report: CleanReport::default(),
        }
    }

    /// Dispatch one node. Returns `true` if the node was removed.
    fn visit<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<bool> {
        self.report.visited += 1;

        match dom.kind(node) {
            NodeKind::Comment => self.visit_comment(dom, node),
            NodeKind::Text => self.visit_text(dom, node),
            NodeKind::Element => self.visit_element(dom, node),
            NodeKind::Document | NodeKind::Other => {
                self.visit_children(dom, node)?;
                Ok(false)
            }
        }
    }

    fn visit_comment<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<bool> {
        if !self.options.remove_comments {
            return Ok(false);
        }

        self.remove_spaced(dom, node)?;
        self.report.comments_removed += 1;
        Ok(true)
    }

    /// First-sweep handling of a text node: only the emptiness decision.
    /// Normalization happens in [`Self::normalize_text_children`].
    fn visit_text<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<bool> {
        if !self.options.remove_empty_elements || is_raw_text_context(dom, node) {
            return Ok(false);
        }

        let whitespace_only = dom.text(node).is_none_or(|text| is_whitespace_only(&text));
        if !whitespace_only {
            return Ok(false);
        }

        self.remove_spaced(dom, node)?;
        self.report.empty_removed += 1;
        Ok(true)
    }

    fn visit_element<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<bool> {
        let attributes = rebuild_attributes(dom, node)?;
        self.report.attributes_dropped += attributes.dropped;

        if self.options.remove_empty_elements
            && attributes.kept == 0
            && is_empty_element(dom, node)
        {
            log::trace!("removing empty element <{}>", dom.tag_name(node).unwrap_or_default());
            dom.remove(node)?;
            self.report.empty_removed += 1;
            return Ok(true);
        }

        self.visit_children(dom, node)?;
        Ok(false)
    }

    fn visit_children<D: DomTree>(&mut self, dom: &mut D, parent: D::Node) -> Result<()> {
        let mut child = dom.first_child(parent);
        while let Some(current) = child {
            // Captured first: visiting `current` may detach it.
            let next = dom.next_sibling(current);
            self.visit(dom, current)?;
            child = next;
        }

        let raw_text_parent = dom
            .tag_name(parent)
            .is_some_and(|tag| RawTextTag::from_tag_name(&tag).is_some());
        if !raw_text_parent {
            self.normalize_text_children(dom, parent)?;
        }
        Ok(())
    }

    /// Second sweep: normalize the surviving text children of `parent`.
    fn normalize_text_children<D: DomTree>(&mut self, dom: &mut D, parent: D::Node) -> Result<()> {
        let mut child = dom.first_child(parent);
        while let Some(current) = child {
            let next = dom.next_sibling(current);
            if dom.kind(current) == NodeKind::Text {
                self.normalize_text(dom, current)?;
            }
            child = next;
        }
        Ok(())
    }

    fn normalize_text<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<()> {
        let Some(original) = dom.text(node) else {
            return Ok(());
        };

        let keep_leading = needs_leading_separator(dom, node);
        let keep_trailing = needs_trailing_separator(dom, node);

        let normalized = normalize_with_boundaries(
            &original,
            self.options.keep_new_lines,
            keep_leading,
            keep_trailing,
        )?;

        if normalized != original {
            dom.replace_text(node, &normalized)?;
            self.report.text_rewritten += 1;
        }
        Ok(())
    }

    fn remove_spaced<D: DomTree>(&mut self, dom: &mut D, node: D::Node) -> Result<()> {
        if remove_with_spacing(dom, node)? {
            self.report.spaces_inserted += 1;
        }
        Ok(())
    }
}

/// Whether a text node should keep a separator at its start.
///
/// Siblings are normalized in order, so preceding text is final. Emptied
/// text is skipped; the nearest non-empty text decides.
fn needs_leading_separator<D: DomTree>(dom: &D, node: D::Node) -> bool {
    let mut prev = dom.prev_sibling(node);
    while let Some(current) = prev {
        if dom.kind(current) != NodeKind::Text {
            return true;
        }
        if let Some(text) = dom.text(current) {
            return !text.ends_with(|c: char| c.is_ascii_whitespace());
        }
        prev = dom.prev_sibling(current);
    }
    false
}

/// Whether a text node should keep a separator at its end.
///
/// Following whitespace-only text normalizes to empty later in the sweep,
/// so it does not count as content to separate from.
fn needs_trailing_separator<D: DomTree>(dom: &D, node: D::Node) -> bool {
    let mut next = dom.next_sibling(node);
    while let Some(current) = next {
        if dom.kind(current) != NodeKind::Text {
            return true;
        }
        if dom.text(current).is_some_and(|text| !is_whitespace_only(&text)) {
            return true;
        }
        next = dom.next_sibling(current);
    }
    false
}

/// Whether an attribute-less element counts as empty.
///
/// Ordinary elements are empty when their text content is whitespace
/// only. Raw-text elements (`pre`, `textarea`, ...) keep whitespace as
/// content, so they are empty only when they hold no text at all.
fn is_empty_element<D: DomTree>(dom: &D, node: D::Node) -> bool {
    let content = dom.text_content(node);
    let raw_text = dom
        .tag_name(node)
        .is_some_and(|tag| RawTextTag::from_tag_name(&tag).is_some());

    if raw_text {
        content.is_empty()
    } else {
        is_whitespace_only(&content)
    }
}
