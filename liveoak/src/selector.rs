//! Boundary to an external CSS selector engine.
//!
//! Selector matching itself lives outside this crate. What lives here is
//! the shape of the hand-off: an engine produces a [`SelectorList`]
//! snapshot of node ids, and [`NodeList::Selector`](crate::collections::NodeList)
//! wraps it for script-facing access.

use crate::arena::NodeId;
use crate::collections::NodeList;
use crate::document::Document;
use crate::error::Result;

/// A snapshot of selector matches, in the order the engine produced them.
#[derive(Debug, Clone, Default)]
pub struct SelectorList {
    nodes: Vec<NodeId>,
}

impl SelectorList {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn item(&self, index: u32) -> Option<NodeId> {
        self.nodes.get(index as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

impl FromIterator<NodeId> for SelectorList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// What this crate requires from a selector engine.
pub trait SelectorEngine {
    /// All elements under `root` matching `selector`, in tree order.
    fn query_all(&self, doc: &Document, root: NodeId, selector: &str) -> Result<SelectorList>;

    /// Whether `element` matches `selector`.
    fn matches(&self, doc: &Document, element: NodeId, selector: &str) -> Result<bool>;
}

/// `root.querySelectorAll(selector)` via the given engine, wrapped as a
/// [`NodeList`].
pub fn query_selector_all<E: SelectorEngine>(
    engine: &E,
    doc: &Document,
    root: NodeId,
    selector: &str,
) -> Result<NodeList> {
    Ok(NodeList::selector(engine.query_all(doc, root, selector)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{Namespace, TagKind};

    /// Toy engine for exercising the boundary: understands bare tag names.
    struct TagEngine;

    impl SelectorEngine for TagEngine {
        fn query_all(
            &self,
            doc: &Document,
            root: NodeId,
            selector: &str,
        ) -> Result<SelectorList> {
            let mut collection = doc.elements_by_tag_name(root, selector);
            let len = collection.length(doc);
            Ok((0..len).filter_map(|i| collection.item(i, doc)).collect())
        }

        fn matches(&self, doc: &Document, element: NodeId, selector: &str) -> Result<bool> {
            Ok(doc
                .element(element)
                .is_some_and(|e| e.tag() == TagKind::from_name(selector)))
        }
    }

    #[test]
    fn test_selector_list_is_a_snapshot() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.create_element(Namespace::Html, "p", []).unwrap();
        doc.append_child(root, p).unwrap();

        let mut list = query_selector_all(&TagEngine, &doc, root, "p").unwrap();
        assert_eq!(list.length(&doc), 1);
        assert_eq!(list.item(0, &doc), Some(p));

        // snapshots do not track later mutations
        let p2 = doc.create_element(Namespace::Html, "p", []).unwrap();
        doc.append_child(root, p2).unwrap();
        assert_eq!(list.length(&doc), 1);
    }
}
