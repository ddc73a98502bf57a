//! User-facing collection façades.
//!
//! Each type here is a thin wrapper over one [`NodeLive`] (or, for
//! [`ChildNodes`], a bare sibling cursor). The façades hold no caches of
//! their own — all position/length state lives in the live view they
//! delegate to.

mod all;
mod child_nodes;
mod forms;
mod options;
mod token_list;

pub use all::{AllArg, HtmlAllCollection};
pub use child_nodes::ChildNodes;
pub use forms::{HtmlFormControlsCollection, NamedItem, RadioNodeList};
pub use options::HtmlOptionsCollection;
pub use token_list::DomTokenList;

use crate::arena::NodeId;
use crate::document::Document;
use crate::live::{LiveIter, NodeLive};
use crate::selector::SelectorList;

/// A live collection of elements (`getElementsByTagName` and friends).
#[derive(Debug, Clone)]
pub struct HtmlCollection {
    live: NodeLive,
}

impl HtmlCollection {
    pub fn new(live: NodeLive) -> Self {
        Self { live }
    }

    /// Number of elements currently in the collection.
    pub fn length(&mut self, doc: &Document) -> u32 {
        self.live.length(doc)
    }

    /// The `index`-th element, or `None` past the end.
    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.live.get_at_index(index, doc)
    }

    /// The first element whose id (fast path) or `name` attribute matches.
    pub fn named_item(&self, name: &str, doc: &Document) -> Option<NodeId> {
        self.live.get_by_name(name, doc)
    }

    /// Iterate over the current contents with an independent cursor.
    pub fn iter<'a>(&'a self, doc: &'a Document) -> LiveIter<'a> {
        self.live.iter(doc)
    }
}

/// A live or snapshot list of nodes (`childNodes`, `getElementsByName`,
/// `querySelectorAll` results, radio groups).
#[derive(Debug, Clone)]
pub enum NodeList {
    /// Direct children of one node — the dedicated sibling-cursor fast path.
    ChildNodes(ChildNodes),
    /// A name-filtered (or otherwise filtered) live view.
    Live(NodeLive),
    /// A snapshot handed back by an external selector engine.
    Selector(SelectorList),
    /// A live radio-group view.
    Radio(RadioNodeList),
}

impl NodeList {
    pub fn child_nodes(children: ChildNodes) -> Self {
        NodeList::ChildNodes(children)
    }

    pub fn live(live: NodeLive) -> Self {
        NodeList::Live(live)
    }

    pub fn selector(list: SelectorList) -> Self {
        NodeList::Selector(list)
    }

    pub fn radio(radio: RadioNodeList) -> Self {
        NodeList::Radio(radio)
    }

    /// Number of nodes currently in the list.
    pub fn length(&mut self, doc: &Document) -> u32 {
        match self {
            NodeList::ChildNodes(children) => children.length(doc),
            NodeList::Live(live) => live.length(doc),
            NodeList::Selector(list) => list.len(),
            NodeList::Radio(radio) => radio.length(doc),
        }
    }

    /// The `index`-th node, or `None` past the end.
    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        match self {
            NodeList::ChildNodes(children) => children.item(index, doc),
            NodeList::Live(live) => live.get_at_index(index, doc),
            NodeList::Selector(list) => list.item(index),
            NodeList::Radio(radio) => radio.item(index, doc),
        }
    }

    /// Collect the current contents. Iteration order is tree order (or the
    /// snapshot's own order for selector results).
    pub fn to_vec(&mut self, doc: &Document) -> Vec<NodeId> {
        let len = self.length(doc);
        (0..len).filter_map(|i| self.item(i, doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Namespace;

    #[test]
    fn test_collection_length_index_consistency() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(Namespace::Html, "div", []).unwrap();
        doc.append_child(root, div).unwrap();
        for _ in 0..5 {
            let span = doc.create_element(Namespace::Html, "span", []).unwrap();
            doc.append_child(div, span).unwrap();
        }

        let mut spans = doc.elements_by_tag_name(root, "span");
        let len = spans.length(&doc);
        assert_eq!(len, 5);
        for i in 0..len {
            assert!(spans.item(i, &doc).is_some(), "index {i} within length");
        }
        assert_eq!(spans.item(len, &doc), None);
    }

    #[test]
    fn test_same_collection_sees_mutations() {
        let mut doc = Document::new();
        let root = doc.root();
        let d = doc
            .create_element(Namespace::Html, "div", [("id".into(), "d".into())])
            .unwrap();
        doc.append_child(root, d).unwrap();
        for _ in 0..2 {
            let span = doc.create_element(Namespace::Html, "span", []).unwrap();
            doc.append_child(d, span).unwrap();
        }

        let mut spans = doc.elements_by_tag_name(d, "span");
        assert_eq!(spans.length(&doc), 2);

        let last = doc.arena().last_child(d).unwrap();
        doc.remove_child(d, last).unwrap();
        assert_eq!(spans.length(&doc), 1);
    }

    #[test]
    fn test_named_item_prefers_id() {
        let mut doc = Document::new();
        let root = doc.root();
        let by_name = doc
            .create_element(Namespace::Html, "form", [("name".into(), "x".into())])
            .unwrap();
        let by_id = doc
            .create_element(Namespace::Html, "form", [("id".into(), "x".into())])
            .unwrap();
        doc.append_child(root, by_name).unwrap();
        doc.append_child(root, by_id).unwrap();

        let forms = doc.forms();
        assert_eq!(forms.named_item("x", &doc), Some(by_id));
    }

    #[test]
    fn test_node_list_by_name() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc
            .create_element(Namespace::Html, "input", [("name".into(), "q".into())])
            .unwrap();
        let b = doc
            .create_element(Namespace::Html, "meta", [("name".into(), "q".into())])
            .unwrap();
        let other = doc
            .create_element(Namespace::Html, "input", [("name".into(), "z".into())])
            .unwrap();
        doc.append_child(root, a).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_child(root, other).unwrap();

        let mut list = doc.elements_by_name("q");
        assert_eq!(list.length(&doc), 2);
        assert_eq!(list.to_vec(&doc), vec![a, b]);
    }
}
