//! Cleaning through a minimal arena-backed `DomTree`, independent of
//! `dom_query`.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use rs_domclean::{
    clean, escape_text_node, serialize_smart, CleanOptions, DomTree, Error, NodeKind, Result,
};

#[derive(Debug)]
struct Slot {
    kind: NodeKind,
    tag: Option<String>,
    attrs: Vec<(String, String)>,
    data: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Slot>,
    refuse_removal: bool,
}

impl Arena {
    fn new() -> (Self, usize) {
        let mut arena = Self::default();
        let root = arena.push(None, NodeKind::Document, None, "");
        (arena, root)
    }

    fn push(&mut self, parent: Option<usize>, kind: NodeKind, tag: Option<&str>, data: &str) -> usize {
        let id = self.slots.len();
        self.slots.push(Slot {
            kind,
            tag: tag.map(str::to_string),
            attrs: Vec::new(),
            data: data.to_string(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.slots[parent].children.push(id);
        }
        id
    }

    fn element(&mut self, parent: usize, tag: &str) -> usize {
        self.push(Some(parent), NodeKind::Element, Some(tag), "")
    }

    fn text_node(&mut self, parent: usize, data: &str) -> usize {
        self.push(Some(parent), NodeKind::Text, None, data)
    }

    fn comment(&mut self, parent: usize, data: &str) -> usize {
        self.push(Some(parent), NodeKind::Comment, None, data)
    }

    fn sibling(&self, node: usize, offset: isize) -> Option<usize> {
        let parent = self.slots[node].parent?;
        let siblings = &self.slots[parent].children;
        let index = siblings.iter().position(|&id| id == node)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }
}

impl DomTree for Arena {
    type Node = usize;

    fn kind(&self, node: usize) -> NodeKind {
        self.slots[node].kind
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.slots[node].parent
    }

    fn first_child(&self, node: usize) -> Option<usize> {
        self.slots[node].children.first().copied()
    }

    fn next_sibling(&self, node: usize) -> Option<usize> {
        self.sibling(node, 1)
    }

    fn prev_sibling(&self, node: usize) -> Option<usize> {
        self.sibling(node, -1)
    }

    fn tag_name(&self, node: usize) -> Option<String> {
        self.slots[node].tag.clone()
    }

    fn has_any_attribute(&self, node: usize) -> bool {
        !self.slots[node].attrs.is_empty()
    }

    fn attributes(&self, node: usize) -> Vec<(String, String)> {
        self.slots[node].attrs.clone()
    }

    fn remove_attribute(&mut self, node: usize, name: &str) {
        self.slots[node].attrs.retain(|(n, _)| n != name);
    }

    fn set_attribute(&mut self, node: usize, name: &str, value: &str) {
        let attrs = &mut self.slots[node].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn text(&self, node: usize) -> Option<String> {
        let slot = &self.slots[node];
        match slot.kind {
            NodeKind::Text | NodeKind::Comment if !slot.data.is_empty() => Some(slot.data.clone()),
            _ => None,
        }
    }

    fn replace_text(&mut self, node: usize, text: &str) -> Result<()> {
        if self.slots[node].kind != NodeKind::Text {
            return Err(Error::Mutation(format!("node {node} is not text")));
        }
        self.slots[node].data = text.to_string();
        Ok(())
    }

    fn remove(&mut self, node: usize) -> Result<()> {
        if self.refuse_removal {
            return Err(Error::Mutation(format!("removal of node {node} refused")));
        }
        let parent = self.slots[node]
            .parent
            .take()
            .ok_or_else(|| Error::Mutation(format!("node {node} is detached")))?;
        self.slots[parent].children.retain(|&id| id != node);
        Ok(())
    }

    fn serialize(&self, node: usize) -> String {
        serialize_smart(self, node).unwrap_or_default()
    }
}

#[test]
fn cleans_arena_tree() {
    let (mut dom, root) = Arena::new();
    let div = dom.element(root, "div");
    dom.set_attribute(div, " class ", "  box ");
    dom.text_node(div, "  Hello");
    dom.comment(div, " note ");
    dom.text_node(div, "World");
    dom.element(div, "span");
    dom.text_node(div, "  tail  ");

    let report = clean(&mut dom, root, &CleanOptions::minify()).expect("clean");

    assert_eq!(dom.serialize(root), r#"<div class="box">Hello World tail</div>"#);
    assert_eq!(report.comments_removed, 1);
    assert_eq!(report.empty_removed, 1);
    assert_eq!(report.spaces_inserted, 1);
}

#[test]
fn arena_second_pass_is_noop() {
    let (mut dom, root) = Arena::new();
    let p = dom.element(root, "p");
    dom.text_node(p, "a");
    dom.comment(p, "x");
    dom.text_node(p, "   ");
    dom.element(p, "br");
    dom.text_node(p, "  b  ");
    let pre = dom.element(root, "pre");
    dom.text_node(pre, "  keep   me ");

    let options = CleanOptions::minify();
    clean(&mut dom, root, &options).expect("first pass");
    let first = dom.serialize(root);
    let report = clean(&mut dom, root, &options).expect("second pass");

    assert_eq!(dom.serialize(root), first);
    assert!(report.is_noop(), "{report:?}");
    assert_eq!(first, "<p>a b</p><pre>  keep   me </pre>");
}

#[test]
fn escaping_follows_parent_context() {
    let (mut dom, root) = Arena::new();
    let script = dom.element(root, "SCRIPT");
    let code = dom.text_node(script, "a < b");
    let p = dom.element(root, "p");
    let prose = dom.text_node(p, "\n a < b");

    assert_eq!(escape_text_node(&dom, code).expect("escape"), "a < b");
    assert_eq!(escape_text_node(&dom, prose).expect("escape"), "\n a &lt; b");
}

#[test]
fn mutation_failure_propagates() {
    let (mut dom, root) = Arena::new();
    let p = dom.element(root, "p");
    dom.text_node(p, "  one  ");
    dom.comment(p, "c");
    dom.refuse_removal = true;

    let err = clean(&mut dom, root, &CleanOptions::minify()).expect_err("removal refused");

    assert!(matches!(err, Error::Mutation(_)));
    // The refused comment stays attached.
    assert_eq!(dom.slots[p].children.len(), 2);
}
