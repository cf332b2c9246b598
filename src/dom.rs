//! DOM Contract and `dom_query` Adapter
//!
//! The cleaning pass never touches a DOM engine directly. It goes through the
//! [`DomTree`] trait, which names the handful of primitives it needs: node
//! classification, navigation, attribute storage, character data and node
//! removal. [`DomDocument`] implements the contract over a
//! `dom_query::Document`.

use std::fmt::Debug;

// Re-export core types for external use
pub use dom_query::{Document, NodeId};

use dom_query::{Attr, NodeData, NodeRef};
use html5ever::{local_name, ns, LocalName, Prefix, QualName};
use tendril::StrTendril;

use crate::error::{Error, Result};

/// Node classification as seen by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document or document fragment root.
    Document,
    /// Element with a tag name and attributes.
    Element,
    /// Character data that may be rewritten.
    Text,
    /// Comment; removable, never rewritten.
    Comment,
    /// Doctype, processing instruction, anything else.
    Other,
}

/// The DOM primitives a cleaning pass consumes.
///
/// Handles are opaque and cheap to copy. An engine is free to invalidate
/// a handle once [`DomTree::remove`] has been called on it; the cleaner
/// never touches a removed handle again.
pub trait DomTree {
    /// Opaque node handle.
    type Node: Copy + Eq + Debug;

    /// Classify a node.
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Parent node, `None` for the root or a detached node.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First child in document order.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next sibling in document order.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Previous sibling in document order.
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Local tag name of an element, `None` for every other kind.
    fn tag_name(&self, node: Self::Node) -> Option<String>;

    /// Whether an element carries at least one attribute.
    fn has_any_attribute(&self, node: Self::Node) -> bool;

    /// Owned copy of an element's attributes in insertion order.
    ///
    /// Names are qualified: a namespaced attribute is listed as
    /// `prefix:local` (`xlink:href`, `xmlns:xlink`), and the same string
    /// addresses it in [`DomTree::remove_attribute`] and
    /// [`DomTree::set_attribute`].
    fn attributes(&self, node: Self::Node) -> Vec<(String, String)>;

    /// Remove an attribute by name.
    ///
    /// Removing an attribute the element does not carry is a no-op, never an
    /// error.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Create or overwrite an attribute.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Owned copy of the character data of a text or comment node.
    ///
    /// Returns `None` when the node has no character data or the data is
    /// empty. Callers treat `None` as empty content, not as a failure.
    fn text(&self, node: Self::Node) -> Option<String>;

    /// Replace the character data of a text node.
    ///
    /// # Errors
    ///
    /// Returns `Error::Mutation` if the node is not a text node.
    fn replace_text(&mut self, node: Self::Node, text: &str) -> Result<()>;

    /// Detach a node from its parent and release it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Mutation` if the engine refuses the removal.
    fn remove(&mut self, node: Self::Node) -> Result<()>;

    /// Serialize a node and its subtree to markup.
    fn serialize(&self, node: Self::Node) -> String;

    /// Concatenated text of every descendant text node.
    fn text_content(&self, node: Self::Node) -> String {
        let mut out = String::new();
        collect_text(self, node, &mut out);
        out
    }

    /// Snapshot of a node's children.
    fn children(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut child = self.first_child(node);
        while let Some(current) = child {
            out.push(current);
            child = self.next_sibling(current);
        }
        out
    }
}

fn collect_text<D: DomTree + ?Sized>(dom: &D, node: D::Node, out: &mut String) {
    match dom.kind(node) {
        NodeKind::Text => {
            if let Some(text) = dom.text(node) {
                out.push_str(&text);
            }
        }
        NodeKind::Comment | NodeKind::Other => {}
        NodeKind::Document | NodeKind::Element => {
            let mut child = dom.first_child(node);
            while let Some(current) = child {
                collect_text(dom, current, out);
                child = dom.next_sibling(current);
            }
        }
    }
}

/// [`DomTree`] over a parsed `dom_query::Document`.
///
/// Node handles are `NodeId`s. `dom_query` keeps detached nodes in its arena,
/// so a removed handle stays memory-safe but is never revisited.
#[derive(Clone, Copy)]
pub struct DomDocument<'a> {
    doc: &'a Document,
}

impl<'a> DomDocument<'a> {
    /// Wrap a parsed document.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// The document root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.doc.root().id
    }

    /// The `<body>` element, if the document still has one.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.doc.select("body").nodes().first().map(|node| node.id)
    }

    fn node(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef::new(id, &self.doc.tree)
    }
}

impl DomTree for DomDocument<'_> {
    type Node = NodeId;

    fn kind(&self, node: NodeId) -> NodeKind {
        let node = self.node(node);
        if node.is_element() {
            NodeKind::Element
        } else if node.is_text() {
            NodeKind::Text
        } else if node.is_comment() {
            NodeKind::Comment
        } else if node.is_document() || node.is_fragment() {
            NodeKind::Document
        } else {
            NodeKind::Other
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent().map(|n| n.id)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).first_child().map(|n| n.id)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).next_sibling().map(|n| n.id)
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).prev_sibling().map(|n| n.id)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        let node = self.node(node);
        if !node.is_element() {
            return None;
        }
        node.node_name().map(|t| t.to_string())
    }

    fn has_any_attribute(&self, node: NodeId) -> bool {
        !self.node(node).attrs().is_empty()
    }

    fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        self.node(node)
            .attrs()
            .iter()
            .map(|attr| (qualified_name(&attr.name), attr.value.to_string()))
            .collect()
    }

    // `NodeRef::set_attr`/`remove_attr` key on the local name and rebuild
    // with an empty namespace, so the attribute list is edited directly.
    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.node(node).update(|n| {
            if let NodeData::Element(element) = &mut n.data {
                element.attrs.retain(|attr| qualified_name(&attr.name) != name);
            }
        });
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.node(node).update(|n| {
            let NodeData::Element(element) = &mut n.data else {
                return;
            };
            let value = StrTendril::from(value);
            match element
                .attrs
                .iter_mut()
                .find(|attr| qualified_name(&attr.name) == name)
            {
                Some(attr) => attr.value = value,
                None => element.attrs.push(Attr {
                    name: attribute_name(name),
                    value,
                }),
            }
        });
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.node(node)
            .query(|n| match &n.data {
                NodeData::Text { contents } | NodeData::Comment { contents } => {
                    Some(contents.to_string())
                }
                _ => None,
            })
            .flatten()
            .filter(|text| !text.is_empty())
    }

    fn replace_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        let replaced = self
            .node(node)
            .update(|n| match &mut n.data {
                NodeData::Text { contents } => {
                    *contents = StrTendril::from(text);
                    true
                }
                _ => false,
            })
            .unwrap_or(false);

        if replaced {
            Ok(())
        } else {
            Err(Error::Mutation(format!("node {node:?} is not a text node")))
        }
    }

    fn remove(&mut self, node: NodeId) -> Result<()> {
        let node_ref = self.node(node);
        if node_ref.parent().is_none() {
            return Err(Error::Mutation(format!("node {node:?} has no parent")));
        }
        node_ref.remove_from_parent();
        Ok(())
    }

    fn serialize(&self, node: NodeId) -> String {
        self.node(node).html().to_string()
    }

    fn text_content(&self, node: NodeId) -> String {
        self.node(node).text().to_string()
    }
}

// === Attribute Names ===

/// `prefix:local` for a namespaced attribute, `local` otherwise.
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

/// Inverse of [`qualified_name`] for the prefixes the HTML parser assigns
/// in foreign (SVG/MathML) content; anything else is a plain HTML name.
fn attribute_name(name: &str) -> QualName {
    let (prefix, ns, local) = match name.split_once(':') {
        Some(("xlink", local)) => (Some("xlink"), ns!(xlink), local),
        Some(("xml", local)) => (Some("xml"), ns!(xml), local),
        Some(("xmlns", local)) => (Some("xmlns"), ns!(xmlns), local),
        _ if name == "xmlns" => {
            return QualName::new(None, ns!(xmlns), local_name!("xmlns"));
        }
        _ => (None, ns!(), name),
    };
    QualName::new(prefix.map(Prefix::from), ns, LocalName::from(local))
}

// === Element Utilities ===

/// Check if a tag name is a void element (no children, no end tag).
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    const VOID_ELEMENTS: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input",
        "link", "meta", "param", "source", "track", "wbr",
    ];

    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
