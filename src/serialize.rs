//! Context-aware markup serialization.
//!
//! Writes a subtree back to HTML using [`escape_text_node`] for character
//! data, so text under `script`, `style`, `xmp` and friends comes out
//! verbatim while everything else is entity-escaped.

use crate::context::{escape_into, escape_text_node};
use crate::dom::{is_void_element, DomTree, NodeKind};
use crate::error::Result;

/// Serialize a node and its subtree with context-aware escaping.
///
/// Element and attribute names are written as stored; attribute values are
/// always quoted and escaped. Nodes the cleaner does not classify (doctype,
/// processing instructions) fall back to the engine's own serializer.
///
/// # Errors
///
/// Returns `Error::Allocation` if an escape buffer cannot be reserved.
pub fn serialize_smart<D: DomTree>(dom: &D, node: D::Node) -> Result<String> {
    let mut out = String::new();
    write_node(dom, node, &mut out)?;
    Ok(out)
}

fn write_node<D: DomTree>(dom: &D, node: D::Node, out: &mut String) -> Result<()> {
    match dom.kind(node) {
        NodeKind::Document => write_children(dom, node, out)?,
        NodeKind::Text => out.push_str(&escape_text_node(dom, node)?),
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&dom.text(node).unwrap_or_default());
            out.push_str("-->");
        }
        NodeKind::Element => {
            let tag = dom.tag_name(node).unwrap_or_default();
            out.push('<');
            out.push_str(&tag);
            for (name, value) in dom.attributes(node) {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                escape_into(&value, out);
                out.push('"');
            }
            out.push('>');

            if is_void_element(&tag) {
                return Ok(());
            }

            write_children(dom, node, out)?;
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        NodeKind::Other => out.push_str(&dom.serialize(node)),
    }
    Ok(())
}

fn write_children<D: DomTree>(dom: &D, parent: D::Node, out: &mut String) -> Result<()> {
    let mut child = dom.first_child(parent);
    while let Some(current) = child {
        write_node(dom, current, out)?;
        child = dom.next_sibling(current);
    }
    Ok(())
}
