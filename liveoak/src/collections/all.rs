//! `document.all` — every element, plus the legacy callable quirk.

use crate::arena::NodeId;
use crate::document::Document;
use crate::live::{LiveIter, NodeLive};

/// Argument to the `document.all(...)` legacy call form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllArg<'a> {
    Index(u32),
    Name(&'a str),
}

/// The `document.all` collection: a full-subtree element walk with both
/// indexed and id/name lookup. Scripts may also *call* it —
/// `document.all(5)`, `document.all('id')` — which [`HtmlAllCollection::call`]
/// models for the bridge.
#[derive(Debug, Clone)]
pub struct HtmlAllCollection {
    live: NodeLive,
}

impl HtmlAllCollection {
    pub fn new(live: NodeLive) -> Self {
        Self { live }
    }

    pub fn length(&mut self, doc: &Document) -> u32 {
        self.live.length(doc)
    }

    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.live.get_at_index(index, doc)
    }

    /// Lookup by id first, `name` attribute second.
    pub fn named_item(&self, name: &str, doc: &Document) -> Option<NodeId> {
        self.live.get_by_name(name, doc)
    }

    /// The call form. A string of digits is treated as an index, matching
    /// how scripts can invoke `document.all("5")`.
    pub fn call(&mut self, arg: AllArg<'_>, doc: &Document) -> Option<NodeId> {
        match arg {
            AllArg::Index(index) => self.item(index, doc),
            AllArg::Name(name) => match name.parse::<u32>() {
                Ok(index) => self.item(index, doc),
                Err(_) => self.named_item(name, doc),
            },
        }
    }

    pub fn iter<'a>(&'a self, doc: &'a Document) -> LiveIter<'a> {
        self.live.iter(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Namespace;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc
            .create_element(Namespace::Html, "div", [("id".into(), "main".into())])
            .unwrap();
        let img = doc
            .create_element(Namespace::Html, "img", [("name".into(), "logo".into())])
            .unwrap();
        doc.append_child(root, div).unwrap();
        doc.append_child(div, img).unwrap();
        (doc, div, img)
    }

    #[test]
    fn test_counts_all_elements() {
        let (mut doc, _, _) = sample();
        let text = doc.create_text("ignored");
        let body = doc.root();
        doc.append_child(body, text).unwrap();

        let mut all = doc.all();
        assert_eq!(all.length(&doc), 2);
    }

    #[test]
    fn test_call_forms() {
        let (doc, div, img) = sample();
        let mut all = doc.all();

        assert_eq!(all.call(AllArg::Index(0), &doc), Some(div));
        assert_eq!(all.call(AllArg::Index(1), &doc), Some(img));
        assert_eq!(all.call(AllArg::Index(2), &doc), None);

        assert_eq!(all.call(AllArg::Name("main"), &doc), Some(div));
        assert_eq!(all.call(AllArg::Name("logo"), &doc), Some(img));
        // digit strings index instead of naming
        assert_eq!(all.call(AllArg::Name("1"), &doc), Some(img));
        assert_eq!(all.call(AllArg::Name("nope"), &doc), None);
    }
}
