//! HTML5 parsing via html5ever's TreeSink, building straight into the
//! arena — the same node representation queries and live views run on,
//! with no post-parse conversion.

use std::borrow::Cow;
use std::cell::RefCell;

use compact_str::CompactString;
use html5ever::tree_builder::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, LocalName, QualName};
use html5ever::{local_name, namespace_url, ns};
use tendril::{StrTendril, TendrilSink};

use crate::arena::{NodeId, NodeKind};
use crate::document::Document;
use crate::element::ElementData;
use crate::tag::Namespace;
use crate::tracing_macros::trace;

/// Parse an HTML string into a [`Document`].
///
/// Uses html5ever's full tree-construction algorithm, so anything a
/// browser accepts parses here, with the same error recovery.
pub fn parse_document(html: &str) -> Document {
    let sink = DocumentSink::new();
    // html5ever takes a Tendril; subtendrils share this buffer during the
    // parse, and node payloads are copied out as compact strings
    let tendril = StrTendril::from(html);
    html5ever::parse_document(sink, Default::default()).one(tendril)
}

/// Owned element name wrapper
#[derive(Debug, Clone)]
struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &html5ever::Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink that builds the arena document.
struct DocumentSink {
    doc: RefCell<Document>,
}

impl DocumentSink {
    fn new() -> Self {
        Self {
            doc: RefCell::new(Document::new()),
        }
    }
}

impl TreeSink for DocumentSink {
    type Handle = NodeId;
    type Output = Document;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Document {
        self.doc.into_inner()
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // html5ever recovers on its own; nothing to surface
        trace!("parse error: {msg}");
        let _ = msg;
    }

    fn get_document(&self) -> NodeId {
        self.doc.borrow().root()
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {
        // quirks mode has no effect on tree structure or queries here
    }

    fn same_node(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }

    fn elem_name<'a>(&'a self, target: &'a NodeId) -> OwnedElemName {
        let doc = self.doc.borrow();
        if let Some(el) = doc.element(*target) {
            let local = LocalName::from(el.name());
            let ns = match el.ns() {
                Namespace::Html => ns!(html),
                Namespace::Svg => ns!(svg),
                Namespace::MathMl => ns!(mathml),
                Namespace::Xml => html5ever::Namespace::from(el.ns().uri()),
            };
            OwnedElemName(QualName {
                prefix: None,
                ns,
                local,
            })
        } else {
            // not an element - return placeholder
            OwnedElemName(QualName {
                prefix: None,
                ns: ns!(html),
                local: local_name!(""),
            })
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> NodeId {
        let ns = Namespace::from_uri(name.ns.as_ref());
        // first-wins on duplicate attribute names, matching browsers
        let data = ElementData::with_attrs(
            ns,
            name.local.as_ref(),
            attrs.into_iter().map(|attr| {
                (
                    CompactString::from(attr.name.local.as_ref()),
                    CompactString::from(attr.value.as_ref()),
                )
            }),
        );
        self.doc
            .borrow_mut()
            .arena_mut()
            .alloc(NodeKind::Element(data))
    }

    fn create_comment(&self, text: StrTendril) -> NodeId {
        self.doc
            .borrow_mut()
            .arena_mut()
            .alloc(NodeKind::Comment(CompactString::from(text.as_ref())))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> NodeId {
        // processing instructions become empty comments
        self.doc
            .borrow_mut()
            .arena_mut()
            .alloc(NodeKind::Comment(CompactString::new("")))
    }

    fn append(&self, parent: &NodeId, child: NodeOrText<NodeId>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                doc.arena_mut().append(*parent, node);
            }
            NodeOrText::AppendText(text) => {
                // merge with a trailing text node (html5ever behavior)
                if let Some(last) = doc.arena().last_child(*parent)
                    && let NodeKind::Text(existing) = doc.arena_mut().kind_mut(last)
                {
                    existing.push_str(text.as_ref());
                    return;
                }
                let text_node = doc
                    .arena_mut()
                    .alloc(NodeKind::Text(CompactString::from(text.as_ref())));
                doc.arena_mut().append(*parent, text_node);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &NodeId, new_node: NodeOrText<NodeId>) {
        let mut doc = self.doc.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => doc
                .arena_mut()
                .alloc(NodeKind::Text(CompactString::from(text.as_ref()))),
        };
        doc.arena_mut().insert_before(*sibling, node);
    }

    fn append_based_on_parent_node(
        &self,
        element: &NodeId,
        _prev_element: &NodeId,
        child: NodeOrText<NodeId>,
    ) {
        self.append(element, child);
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut doc = self.doc.borrow_mut();
        let name = CompactString::from(name.as_ref());
        let node = doc.arena_mut().alloc(NodeKind::Doctype(name.clone()));
        let root = doc.root();
        doc.arena_mut().append(root, node);
        doc.set_doctype(name);
    }

    fn get_template_contents(&self, target: &NodeId) -> NodeId {
        // the template element itself stands in for its contents fragment
        *target
    }

    fn add_attrs_if_missing(&self, target: &NodeId, attrs: Vec<Attribute>) {
        let mut doc = self.doc.borrow_mut();
        doc.arena_mut().bump();
        if let Some(el) = doc.arena_mut().element_mut(*target) {
            for attr in attrs {
                el.set_attr_if_missing(
                    CompactString::from(attr.name.local.as_ref()),
                    CompactString::from(attr.value.as_ref()),
                );
            }
        }
    }

    fn remove_from_parent(&self, target: &NodeId) {
        self.doc.borrow_mut().arena_mut().detach(*target);
    }

    fn reparent_children(&self, node: &NodeId, new_parent: &NodeId) {
        self.doc
            .borrow_mut()
            .arena_mut()
            .reparent_children(*node, *new_parent);
    }
}
