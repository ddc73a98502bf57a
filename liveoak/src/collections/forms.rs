//! `form.elements` and radio groups.
//!
//! `named_item` here has a polymorphic result: one matching control comes
//! back as the element itself, two or more come back as a live
//! [`RadioNodeList`] over the group. Script-facing identity depends on that
//! distinction, so it is part of the contract, not an implementation detail.

use compact_str::CompactString;

use crate::arena::NodeId;
use crate::document::Document;
use crate::error::Result;
use crate::live::{Filter, LiveIter, NodeLive};
use crate::tag::TagKind;
use crate::walker::WalkMode;

/// Result of a named lookup in a form-controls collection.
#[derive(Debug, Clone)]
pub enum NamedItem {
    /// Exactly one control matched.
    Element(NodeId),
    /// Several controls share the name — a live view over all of them.
    Radio(RadioNodeList),
}

/// Live collection of the listed controls owned by one `<form>`.
///
/// Controls anywhere in the document can belong via their `form`
/// attribute, so the walk covers the whole document, not just the form's
/// subtree.
#[derive(Debug, Clone)]
pub struct HtmlFormControlsCollection {
    form: NodeId,
    live: NodeLive,
}

impl HtmlFormControlsCollection {
    pub fn new(form: NodeId, doc: &Document) -> Self {
        Self {
            form,
            live: NodeLive::new(
                doc.root(),
                WalkMode::ExcludeSelf,
                Filter::FormControls(form),
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

    pub fn iter<'a>(&'a self, doc: &'a Document) -> LiveIter<'a> {
        self.live.iter(doc)
    }

    /// Controls matching `name` by id or `name` attribute. One match is the
    /// element; a collision is a [`RadioNodeList`] aggregating all of them.
    pub fn named_item(&self, name: &str, doc: &Document) -> Option<NamedItem> {
        if name.is_empty() {
            return None;
        }
        let mut matches = self.live.iter(doc).filter(|&id| {
            doc.element(id).is_some_and(|e| {
                e.id() == Some(name) || e.attr("name") == Some(name)
            })
        });
        let first = matches.next()?;
        if matches.next().is_some() {
            Some(NamedItem::Radio(RadioNodeList::new(self.form, name, doc)))
        } else {
            Some(NamedItem::Element(first))
        }
    }
}

/// Live list of the controls in one form sharing an id-or-name, with the
/// radio-group `value` accessors.
#[derive(Debug, Clone)]
pub struct RadioNodeList {
    name: CompactString,
    live: NodeLive,
}

impl RadioNodeList {
    pub fn new(form: NodeId, name: &str, doc: &Document) -> Self {
        Self {
            name: CompactString::from(name),
            live: NodeLive::new(
                doc.root(),
                WalkMode::ExcludeSelf,
                Filter::FormControlsNamed {
                    form,
                    name: CompactString::from(name),
                },
                doc,
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&mut self, doc: &Document) -> u32 {
        self.live.length(doc)
    }

    pub fn item(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.live.get_at_index(index, doc)
    }

    pub fn iter<'a>(&'a self, doc: &'a Document) -> LiveIter<'a> {
        self.live.iter(doc)
    }

    fn is_radio(doc: &Document, id: NodeId) -> bool {
        doc.element(id).is_some_and(|e| {
            e.tag() == TagKind::Input
                && e.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("radio"))
        })
    }

    /// The value of the checked radio in the group, or `None`.
    /// A checked radio without a `value` attribute reports `"on"`.
    pub fn value(&self, doc: &Document) -> Option<CompactString> {
        for id in self.live.iter(doc) {
            if !Self::is_radio(doc, id) {
                continue;
            }
            let Some(el) = doc.element(id) else { continue };
            if el.has_attr("checked") {
                return Some(CompactString::from(el.attr("value").unwrap_or("on")));
            }
        }
        None
    }

    /// Check the radio whose value equals `value`, unchecking the rest of
    /// the group. No radio with that value leaves the group untouched.
    pub fn set_value(&self, doc: &mut Document, value: &str) -> Result<()> {
        let radios: Vec<NodeId> = self
            .live
            .iter(doc)
            .filter(|&id| Self::is_radio(doc, id))
            .collect();
        let target = radios.iter().copied().find(|&id| {
            doc.element(id)
                .is_some_and(|e| e.attr("value").unwrap_or("on") == value)
        });
        let Some(target) = target else {
            return Ok(());
        };
        for radio in radios {
            if radio == target {
                doc.set_attr(radio, "checked", "")?;
            } else {
                doc.remove_attr(radio, "checked");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Namespace;

    fn form_fixture() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc
            .create_element(Namespace::Html, "form", [("id".into(), "f".into())])
            .unwrap();
        doc.append_child(root, form).unwrap();
        (doc, form)
    }

    fn input(doc: &mut Document, attrs: &[(&str, &str)]) -> NodeId {
        doc.create_element(
            Namespace::Html,
            "input",
            attrs
                .iter()
                .map(|(k, v)| (CompactString::from(*k), CompactString::from(*v))),
        )
        .unwrap()
    }

    #[test]
    fn test_structural_and_attribute_membership() {
        let (mut doc, form) = form_fixture();
        let root = doc.root();

        let inside = input(&mut doc, &[("name", "a")]);
        doc.append_child(form, inside).unwrap();

        // outside the form, associated through the form attribute
        let outside = input(&mut doc, &[("name", "b"), ("form", "f")]);
        doc.append_child(root, outside).unwrap();

        // outside with no association
        let stray = input(&mut doc, &[("name", "c")]);
        doc.append_child(root, stray).unwrap();

        let mut controls = doc.form_controls(form);
        assert_eq!(controls.length(&doc), 2);
        let members: Vec<_> = controls.iter(&doc).collect();
        assert!(members.contains(&inside));
        assert!(members.contains(&outside));
        assert!(!members.contains(&stray));
    }

    #[test]
    fn test_image_input_excluded() {
        let (mut doc, form) = form_fixture();
        let image = input(&mut doc, &[("type", "image")]);
        let text = input(&mut doc, &[("type", "text")]);
        doc.append_child(form, image).unwrap();
        doc.append_child(form, text).unwrap();

        let mut controls = doc.form_controls(form);
        assert_eq!(controls.length(&doc), 1);
        assert_eq!(controls.item(0, &doc), Some(text));
    }

    #[test]
    fn test_named_item_single_match() {
        let (mut doc, form) = form_fixture();
        let only = input(&mut doc, &[("name", "x")]);
        doc.append_child(form, only).unwrap();

        let controls = doc.form_controls(form);
        match controls.named_item("x", &doc) {
            Some(NamedItem::Element(id)) => assert_eq!(id, only),
            other => panic!("expected single element, got {other:?}"),
        }
        assert!(controls.named_item("missing", &doc).is_none());
    }

    #[test]
    fn test_named_item_collision_returns_group() {
        let (mut doc, form) = form_fixture();
        let by_id = input(&mut doc, &[("id", "x")]);
        let by_name = input(&mut doc, &[("name", "x")]);
        doc.append_child(form, by_id).unwrap();
        doc.append_child(form, by_name).unwrap();

        let controls = doc.form_controls(form);
        match controls.named_item("x", &doc) {
            Some(NamedItem::Radio(mut group)) => {
                assert_eq!(group.length(&doc), 2);
                assert_eq!(group.item(0, &doc), Some(by_id));
                assert_eq!(group.item(1, &doc), Some(by_name));
            }
            other => panic!("expected radio node list, got {other:?}"),
        }
    }

    #[test]
    fn test_radio_group_value() {
        let (mut doc, form) = form_fixture();
        let yes = input(&mut doc, &[("type", "radio"), ("name", "pick"), ("value", "yes")]);
        let no = input(&mut doc, &[("type", "radio"), ("name", "pick"), ("value", "no")]);
        doc.append_child(form, yes).unwrap();
        doc.append_child(form, no).unwrap();

        let group = RadioNodeList::new(form, "pick", &doc);
        assert_eq!(group.value(&doc), None);

        group.set_value(&mut doc, "no").unwrap();
        assert_eq!(group.value(&doc).as_deref(), Some("no"));
        assert!(!doc.element(yes).unwrap().has_attr("checked"));

        group.set_value(&mut doc, "yes").unwrap();
        assert_eq!(group.value(&doc).as_deref(), Some("yes"));
        assert!(!doc.element(no).unwrap().has_attr("checked"));

        // unknown value leaves the group alone
        group.set_value(&mut doc, "maybe").unwrap();
        assert_eq!(group.value(&doc).as_deref(), Some("yes"));
    }
}
