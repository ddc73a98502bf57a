//! `node.childNodes` — the hot path among the node lists.
//!
//! Direct-children access needs no walker and no filter: the cursor is a
//! bare sibling link plus the index it sits at, version-checked exactly
//! like a live view.

use crate::arena::{Children, NodeId};
use crate::document::Document;

/// Live list of one node's direct children, of any kind.
#[derive(Debug, Clone)]
pub struct ChildNodes {
    parent: NodeId,
    /// Index of the child `last_node` points at.
    last_index: u32,
    last_node: Option<NodeId>,
    cached_length: Option<u32>,
    cached_version: Option<u64>,
}

impl ChildNodes {
    pub fn new(parent: NodeId) -> Self {
        Self {
            parent,
            last_index: 0,
            last_node: None,
            cached_length: None,
            cached_version: None,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    fn revalidate(&mut self, doc: &Document) {
        let version = doc.version();
        if self.cached_version != Some(version) {
            self.last_index = 0;
            self.last_node = None;
            self.cached_length = None;
            self.cached_version = Some(version);
        }
    }

    /// Number of direct children. O(1) when cached for the current version.
    pub fn length(&mut self, doc: &Document) -> u32 {
        self.revalidate(doc);
        if let Some(len) = self.cached_length {
            return len;
        }
        let len = doc.arena().children(self.parent).count() as u32;
        self.cached_length = Some(len);
        len
    }

    /// The `index`-th child. Forward requests resume from the last served
    /// sibling; backward requests restart at the first child.
    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.revalidate(doc);
        if index < self.last_index || self.last_node.is_none() {
            self.last_index = 0;
            self.last_node = doc.arena().first_child(self.parent);
        }
        let mut node = self.last_node?;
        let mut current = self.last_index;
        while current < index {
            match doc.arena().next_sibling(node) {
                Some(next) => {
                    node = next;
                    current += 1;
                }
                None => {
                    self.last_index = 0;
                    self.last_node = None;
                    return None;
                }
            }
        }
        self.last_index = index;
        self.last_node = Some(node);
        Some(node)
    }

    /// Iterate the children without touching the cursor.
    pub fn iter<'a>(&self, doc: &'a Document) -> Children<'a> {
        doc.arena().children(self.parent)
    }
}
