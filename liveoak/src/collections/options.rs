//! `select.options` — option lookup plus selection-state mutation.

use crate::arena::NodeId;
use crate::document::Document;
use crate::error::{DomError, Result};
use crate::live::{Filter, NodeLive};
use crate::tag::TagKind;
use crate::walker::WalkMode;

/// Live collection of a `<select>`'s `<option>` elements (including those
/// nested in `<optgroup>`), with the mutation methods layered on top.
#[derive(Debug, Clone)]
pub struct HtmlOptionsCollection {
    select: NodeId,
    live: NodeLive,
}

impl HtmlOptionsCollection {
    pub fn new(select: NodeId, doc: &Document) -> Self {
        Self {
            select,
            live: NodeLive::new(
                select,
                WalkMode::ExcludeSelf,
                Filter::Tag(TagKind::Option),
                doc,
            ),
        }
    }

    pub fn length(&mut self, doc: &Document) -> u32 {
        self.live.length(doc)
    }

    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.live.get_at_index(index, doc)
    }

    pub fn named_item(&self, name: &str, doc: &Document) -> Option<NodeId> {
        self.live.get_by_name(name, doc)
    }

    /// Insert an `<option>` (or `<optgroup>`), before the option at `before`
    /// if given and in range, else at the end of the `<select>`.
    pub fn add(
        &mut self,
        doc: &mut Document,
        option: NodeId,
        before: Option<u32>,
    ) -> Result<()> {
        let addable = doc
            .element(option)
            .is_some_and(|e| matches!(e.tag(), TagKind::Option | TagKind::Optgroup));
        if !addable {
            return Err(DomError::HierarchyRequest(
                "only option or optgroup elements can be added",
            ));
        }
        match before.and_then(|index| self.item(index, doc)) {
            Some(reference) => {
                let parent = doc
                    .arena()
                    .parent(reference)
                    .expect("collection members are attached");
                doc.insert_before(parent, option, Some(reference))?;
            }
            None => {
                doc.append_child(self.select, option)?;
            }
        }
        Ok(())
    }

    /// Remove the option at `index`. Out-of-range indices are ignored,
    /// matching script-facing behavior.
    pub fn remove(&mut self, doc: &mut Document, index: u32) {
        if let Some(option) = self.item(index, doc) {
            let parent = doc
                .arena()
                .parent(option)
                .expect("collection members are attached");
            doc.remove_child(parent, option)
                .expect("parent link just read");
        }
    }

    /// Index of the first selected option, or -1.
    pub fn selected_index(&mut self, doc: &Document) -> i32 {
        for (i, option) in self.live.iter(doc).enumerate() {
            if doc
                .element(option)
                .is_some_and(|e| e.has_attr("selected"))
            {
                return i as i32;
            }
        }
        -1
    }

    /// Select exactly the option at `index` (deselecting the rest).
    /// A negative or out-of-range index deselects everything.
    pub fn set_selected_index(&mut self, doc: &mut Document, index: i32) -> Result<()> {
        let options: Vec<NodeId> = self.live.iter(doc).collect();
        for (i, &option) in options.iter().enumerate() {
            if index >= 0 && i == index as usize {
                doc.set_attr(option, "selected", "")?;
            } else {
                doc.remove_attr(option, "selected");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Namespace;

    fn select_with_options(n: usize) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let select = doc.create_element(Namespace::Html, "select", []).unwrap();
        doc.append_child(root, select).unwrap();
        let mut options = Vec::new();
        for i in 0..n {
            let option = doc
                .create_element(
                    Namespace::Html,
                    "option",
                    [("value".into(), format!("v{i}").into())],
                )
                .unwrap();
            doc.append_child(select, option).unwrap();
            options.push(option);
        }
        (doc, select, options)
    }

    #[test]
    fn test_options_include_optgroup_children() {
        let (mut doc, select, _) = select_with_options(2);
        let group = doc.create_element(Namespace::Html, "optgroup", []).unwrap();
        doc.append_child(select, group).unwrap();
        let nested = doc.create_element(Namespace::Html, "option", []).unwrap();
        doc.append_child(group, nested).unwrap();

        let mut options = doc.options(select);
        assert_eq!(options.length(&doc), 3);
        assert_eq!(options.item(2, &doc), Some(nested));
    }

    #[test]
    fn test_add_before_and_at_end() {
        let (mut doc, select, existing) = select_with_options(2);
        let mut options = doc.options(select);

        let early = doc.create_element(Namespace::Html, "option", []).unwrap();
        options.add(&mut doc, early, Some(0)).unwrap();
        assert_eq!(options.item(0, &doc), Some(early));
        assert_eq!(options.item(1, &doc), Some(existing[0]));

        let last = doc.create_element(Namespace::Html, "option", []).unwrap();
        options.add(&mut doc, last, None).unwrap();
        assert_eq!(options.item(3, &doc), Some(last));

        let div = doc.create_element(Namespace::Html, "div", []).unwrap();
        assert!(matches!(
            options.add(&mut doc, div, None),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_ignores_out_of_range() {
        let (mut doc, select, _) = select_with_options(2);
        let mut options = doc.options(select);
        options.remove(&mut doc, 7);
        assert_eq!(options.length(&doc), 2);
        options.remove(&mut doc, 0);
        assert_eq!(options.length(&doc), 1);
    }

    #[test]
    fn test_selected_index_round_trip() {
        let (mut doc, select, options_ids) = select_with_options(3);
        let mut options = doc.options(select);
        assert_eq!(options.selected_index(&doc), -1);

        options.set_selected_index(&mut doc, 1).unwrap();
        assert_eq!(options.selected_index(&doc), 1);
        assert!(doc
            .element(options_ids[1])
            .unwrap()
            .has_attr("selected"));

        options.set_selected_index(&mut doc, 2).unwrap();
        assert_eq!(options.selected_index(&doc), 2);
        assert!(!doc
            .element(options_ids[1])
            .unwrap()
            .has_attr("selected"));

        options.set_selected_index(&mut doc, -1).unwrap();
        assert_eq!(options.selected_index(&doc), -1);
    }

    #[test]
    fn test_selected_options_view_follows_mutation() {
        let (mut doc, select, _) = select_with_options(3);
        let mut selected = doc.selected_options(select);
        assert_eq!(selected.length(&doc), 0);

        let mut options = doc.options(select);
        options.set_selected_index(&mut doc, 0).unwrap();
        assert_eq!(selected.length(&doc), 1);
    }
}
