//! The node graph: an arena of intrusively linked tree nodes.
//!
//! All nodes of a document live in one contiguous `Vec`, referenced by
//! `NodeId` handles. Each node carries its parent, first/last child, and
//! prev/next sibling links. Nodes are never individually freed — detaching
//! only unlinks, and the whole arena is released with the document — so a
//! stored `NodeId` always refers to the node it was created for.
//!
//! The arena also owns the document's mutation version counter. Every link
//! operation bumps it before touching the tree, which is what lets live
//! views trust their cached cursors: a cursor is only ever reused after its
//! stamp was compared against the current version.

use compact_str::CompactString;
use std::num::NonZeroU32;

use crate::element::ElementData;

/// Stable handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1).expect("node arena exhausted");
        NodeId(NonZeroU32::new(raw).unwrap())
    }

    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root (invisible, parent of `<html>`)
    Document,
    /// `<!DOCTYPE …>` with its name
    Doctype(CompactString),
    /// Element with tag and attributes
    Element(ElementData),
    /// Text content
    Text(CompactString),
    /// HTML comment
    Comment(CompactString),
    /// Document fragment (parse or script scratch root)
    Fragment,
}

impl NodeKind {
    pub fn is_element(&self) -> bool {
        matches!(self, NodeKind::Element(_))
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this kind of node may have children.
    pub fn accepts_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Document | NodeKind::Element(_) | NodeKind::Fragment
        )
    }
}

/// One arena slot: payload plus intrusive tree links.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

/// Node storage plus the document-wide mutation version counter.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    version: u64,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mutation version. Compared, never interpreted.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record a mutation that live views must observe.
    pub(crate) fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Allocate a detached node. Not a tree mutation — nothing observable
    /// changes until the node is linked in.
    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The node's payload.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.node_mut(id).kind
    }

    /// Element payload shorthand; `None` for non-element nodes.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).kind.as_element()
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Iterate direct children, first to last.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.first_child(id),
        }
    }

    /// Iterate ancestors, starting at the node's parent.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.parent(id),
        }
    }

    /// True if `node` is `ancestor` or a descendant of it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous position first.
    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(child != parent, "cannot append a node to itself");
        debug_assert!(
            !self.contains(child, parent),
            "cannot append a node inside its own subtree"
        );
        self.detach(child);
        self.bump();
        let prev = self.node(parent).last_child;
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.prev_sibling = prev;
        }
        if let Some(prev) = prev {
            self.node_mut(prev).next_sibling = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Insert `new` immediately before `sibling`, which must be attached.
    pub(crate) fn insert_before(&mut self, sibling: NodeId, new: NodeId) {
        let parent = self
            .parent(sibling)
            .expect("insert_before target has no parent");
        debug_assert!(new != sibling, "cannot insert a node before itself");
        debug_assert!(
            !self.contains(new, parent),
            "cannot insert a node inside its own subtree"
        );
        self.detach(new);
        self.bump();
        let prev = self.node(sibling).prev_sibling;
        {
            let node = self.node_mut(new);
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = Some(sibling);
        }
        self.node_mut(sibling).prev_sibling = Some(new);
        if let Some(prev) = prev {
            self.node_mut(prev).next_sibling = Some(new);
        } else {
            self.node_mut(parent).first_child = Some(new);
        }
    }

    /// Unlink a node from its parent and siblings. The node and its subtree
    /// stay allocated and internally linked. No-op for detached nodes.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = self.node(id);
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if parent.is_none() && prev.is_none() && next.is_none() {
            return;
        }
        self.bump();
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = next,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.node_mut(next).prev_sibling = prev,
            None => {
                if let Some(parent) = parent {
                    self.node_mut(parent).last_child = prev;
                }
            }
        }
        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Move every child of `from` to the end of `to`'s child list,
    /// preserving order.
    pub(crate) fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        while let Some(child) = self.first_child(from) {
            self.append(to, child);
        }
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.next_sibling(current);
        Some(current)
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    arena: &'a Arena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Namespace;

    fn element(arena: &mut Arena, name: &str) -> NodeId {
        arena.alloc(NodeKind::Element(ElementData::new(Namespace::Html, name)))
    }

    #[test]
    fn test_append_links() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "ul");
        let a = element(&mut arena, "li");
        let b = element(&mut arena, "li");

        arena.append(parent, a);
        arena.append(parent, b);

        assert_eq!(arena.first_child(parent), Some(a));
        assert_eq!(arena.last_child(parent), Some(b));
        assert_eq!(arena.next_sibling(a), Some(b));
        assert_eq!(arena.prev_sibling(b), Some(a));
        assert_eq!(arena.parent(a), Some(parent));
        assert_eq!(arena.children(parent).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_insert_before() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "ul");
        let a = element(&mut arena, "li");
        let c = element(&mut arena, "li");
        arena.append(parent, a);
        arena.append(parent, c);

        let b = element(&mut arena, "li");
        arena.insert_before(c, b);
        assert_eq!(arena.children(parent).collect::<Vec<_>>(), vec![a, b, c]);

        let front = element(&mut arena, "li");
        arena.insert_before(a, front);
        assert_eq!(arena.first_child(parent), Some(front));
        assert_eq!(arena.prev_sibling(a), Some(front));
    }

    #[test]
    fn test_detach_middle() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "ul");
        let a = element(&mut arena, "li");
        let b = element(&mut arena, "li");
        let c = element(&mut arena, "li");
        for id in [a, b, c] {
            arena.append(parent, id);
        }

        arena.detach(b);
        assert_eq!(arena.children(parent).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(arena.parent(b), None);
        assert_eq!(arena.prev_sibling(b), None);
        assert_eq!(arena.next_sibling(b), None);
        assert_eq!(arena.next_sibling(a), Some(c));
        assert_eq!(arena.prev_sibling(c), Some(a));
    }

    #[test]
    fn test_detach_only_child_clears_list() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "div");
        let only = element(&mut arena, "span");
        arena.append(parent, only);
        arena.detach(only);

        assert_eq!(arena.first_child(parent), None);
        assert_eq!(arena.last_child(parent), None);
    }

    #[test]
    fn test_reparent_preserves_order() {
        let mut arena = Arena::new();
        let from = element(&mut arena, "div");
        let to = element(&mut arena, "div");
        let a = element(&mut arena, "span");
        let b = element(&mut arena, "span");
        arena.append(from, a);
        arena.append(from, b);
        let existing = element(&mut arena, "em");
        arena.append(to, existing);

        arena.reparent_children(from, to);
        assert_eq!(arena.first_child(from), None);
        assert_eq!(
            arena.children(to).collect::<Vec<_>>(),
            vec![existing, a, b]
        );
    }

    #[test]
    fn test_append_reparents() {
        let mut arena = Arena::new();
        let p1 = element(&mut arena, "div");
        let p2 = element(&mut arena, "div");
        let child = element(&mut arena, "span");
        arena.append(p1, child);
        arena.append(p2, child);

        assert_eq!(arena.first_child(p1), None);
        assert_eq!(arena.parent(child), Some(p2));
    }

    #[test]
    fn test_version_bumps_on_structural_mutation() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "div");
        let child = element(&mut arena, "span");
        let v0 = arena.version();

        arena.append(parent, child);
        let v1 = arena.version();
        assert!(v1 > v0);

        arena.detach(child);
        assert!(arena.version() > v1);

        // detaching an already-detached node is not a mutation
        let v2 = arena.version();
        arena.detach(child);
        assert_eq!(arena.version(), v2);
    }

    #[test]
    fn test_alloc_does_not_bump() {
        let mut arena = Arena::new();
        let v0 = arena.version();
        element(&mut arena, "div");
        assert_eq!(arena.version(), v0);
    }

    #[test]
    fn test_contains() {
        let mut arena = Arena::new();
        let root = element(&mut arena, "html");
        let mid = element(&mut arena, "body");
        let leaf = element(&mut arena, "p");
        arena.append(root, mid);
        arena.append(mid, leaf);

        assert!(arena.contains(root, leaf));
        assert!(arena.contains(root, root));
        assert!(!arena.contains(leaf, root));
        assert!(!arena.contains(mid, root));
    }

    #[test]
    fn test_option_node_id_is_free() {
        assert_eq!(
            std::mem::size_of::<Option<NodeId>>(),
            std::mem::size_of::<NodeId>()
        );
    }
}
