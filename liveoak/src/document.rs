//! The document: node factory, mutation API, and query entry points.
//!
//! Every mutation that live views can observe goes through here (or through
//! the arena link operations this wraps), so the version counter is bumped
//! before any cached cursor could read a stale link.

use compact_str::CompactString;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::arena::{Arena, NodeId, NodeKind};
use crate::collections::{
    ChildNodes, HtmlAllCollection, HtmlCollection, HtmlFormControlsCollection,
    HtmlOptionsCollection, NodeList,
};
use crate::element::ElementData;
use crate::error::{DomError, Result};
use crate::live::{Filter, NodeLive, NsFilter};
use crate::tag::{Namespace, TagKind};
use crate::tracing_macros::debug;
use crate::walker::{TreeWalker, WalkMode};

/// Lazily rebuilt id → node map, stamped with the version it was built at.
#[derive(Debug, Clone)]
struct IdIndex {
    version: u64,
    map: HashMap<CompactString, NodeId>,
}

/// A document: the arena, its root document node, and the id index.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena,
    root: NodeId,
    doctype: Option<CompactString>,
    id_index: RefCell<Option<IdIndex>>,
}

impl Document {
    /// A fresh document containing only the (invisible) document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(NodeKind::Document);
        Self {
            arena,
            root,
            doctype: None,
            id_index: RefCell::new(None),
        }
    }

    /// The document node at the top of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The DOCTYPE name, if one was parsed or set.
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub(crate) fn set_doctype(&mut self, name: CompactString) {
        self.doctype = Some(name);
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Current mutation version (see [`Arena::version`]).
    pub fn version(&self) -> u64 {
        self.arena.version()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.arena.kind(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.arena.element(id)
    }

    /// The first element in tree order with the given tag — convenience
    /// for `<html>`, `<head>`, `<body>` lookups.
    pub fn first_by_tag(&self, tag: TagKind) -> Option<NodeId> {
        let mut walker = TreeWalker::new(self.root, WalkMode::Full, &self.arena);
        while let Some(node) = walker.next(&self.arena) {
            if self.arena.element(node).is_some_and(|e| e.tag() == tag) {
                return Some(node);
            }
        }
        None
    }

    /// The `<body>` element if present.
    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag(TagKind::Body)
    }

    /// The `<html>` element if present.
    pub fn document_element(&self) -> Option<NodeId> {
        self.arena
            .children(self.root)
            .find(|&id| self.arena.kind(id).is_element())
    }

    // ------------------------------------------------------------------
    // Node factory
    // ------------------------------------------------------------------

    /// Create a detached element. HTML-namespace tag names are lowercased
    /// and classified once.
    pub fn create_element<I>(&mut self, ns: Namespace, name: &str, attrs: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = (CompactString, CompactString)>,
    {
        validate_name("tag name", name)?;
        let data = ElementData::with_attrs(ns, name, attrs);
        Ok(self.arena.alloc(NodeKind::Element(data)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.alloc(NodeKind::Text(CompactString::from(text)))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena
            .alloc(NodeKind::Comment(CompactString::from(text)))
    }

    /// Create an empty document fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.arena.alloc(NodeKind::Fragment)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.arena.kind(parent).accepts_children() {
            return Err(DomError::HierarchyRequest(
                "parent cannot have children",
            ));
        }
        if matches!(self.arena.kind(child), NodeKind::Document) {
            return Err(DomError::HierarchyRequest(
                "a document cannot be inserted",
            ));
        }
        if child == parent || self.arena.contains(child, parent) {
            return Err(DomError::HierarchyRequest(
                "node would become its own descendant",
            ));
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`. Appending a fragment
    /// moves the fragment's children instead, leaving the fragment empty.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.check_insertion(parent, child)?;
        if matches!(self.arena.kind(child), NodeKind::Fragment) {
            self.arena.reparent_children(child, parent);
        } else {
            self.arena.append(parent, child);
        }
        Ok(child)
    }

    /// Insert `child` before `reference` under `parent`. `None` appends.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, child);
        };
        if self.arena.parent(reference) != Some(parent) {
            return Err(DomError::HierarchyRequest(
                "reference node is not a child of parent",
            ));
        }
        self.check_insertion(parent, child)?;
        if matches!(self.arena.kind(child), NodeKind::Fragment) {
            while let Some(first) = self.arena.first_child(child) {
                self.arena.insert_before(reference, first);
            }
        } else {
            self.arena.insert_before(reference, child);
        }
        Ok(child)
    }

    /// Detach `child` from `parent`. The node stays usable and can be
    /// re-inserted elsewhere.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        if self.arena.parent(child) != Some(parent) {
            return Err(DomError::HierarchyRequest(
                "node to remove is not a child of parent",
            ));
        }
        self.arena.detach(child);
        Ok(child)
    }

    /// Set an attribute. Bumps the version — class/name/id/selected changes
    /// are all filter inputs somewhere.
    pub fn set_attr(&mut self, el: NodeId, name: &str, value: &str) -> Result<()> {
        validate_name("attribute name", name)?;
        if !self.arena.kind(el).is_element() {
            return Err(DomError::HierarchyRequest(
                "attributes can only be set on elements",
            ));
        }
        debug!("set_attr {:?} {}={:?}", el, name, value);
        self.arena.bump();
        self.arena
            .element_mut(el)
            .expect("checked above")
            .set_attr(CompactString::from(name), CompactString::from(value));
        Ok(())
    }

    /// Remove an attribute. Returns whether it existed.
    pub fn remove_attr(&mut self, el: NodeId, name: &str) -> bool {
        let present = self
            .arena
            .element(el)
            .is_some_and(|e| e.has_attr(name));
        if !present {
            return false;
        }
        self.arena.bump();
        self.arena
            .element_mut(el)
            .expect("presence implies element")
            .remove_attr(name);
        true
    }

    /// Replace the data of a text or comment node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        match self.arena.kind_mut(node) {
            NodeKind::Text(data) | NodeKind::Comment(data) => {
                *data = CompactString::from(text);
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// True if `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.arena.contains(ancestor, node)
    }

    /// Concatenated text of the node's subtree.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut walker = TreeWalker::new(node, WalkMode::Full, &self.arena);
        while let Some(id) = walker.next(&self.arena) {
            if let NodeKind::Text(text) = self.arena.kind(id) {
                out.push_str(text);
            }
        }
        out
    }

    /// First element in tree order with the given id. O(N) on the first
    /// lookup after a mutation, O(1) afterwards: the map is rebuilt lazily
    /// and stamped with the version it was built at.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let mut cache = self.id_index.borrow_mut();
        let stale = match &*cache {
            Some(index) => index.version != self.arena.version(),
            None => true,
        };
        if stale {
            debug!("rebuilding id index at version {}", self.arena.version());
            let mut map = HashMap::new();
            let mut walker = TreeWalker::new(self.root, WalkMode::Full, &self.arena);
            while let Some(node) = walker.next(&self.arena) {
                if let Some(el_id) = self.arena.element(node).and_then(|e| e.id()) {
                    // first in tree order wins on duplicates
                    map.entry(CompactString::from(el_id)).or_insert(node);
                }
            }
            *cache = Some(IdIndex {
                version: self.arena.version(),
                map,
            });
        }
        cache.as_ref().unwrap().map.get(id).copied()
    }

    // ------------------------------------------------------------------
    // Live collection entry points
    // ------------------------------------------------------------------

    /// `root.getElementsByTagName(name)` — live, subtree of `root`,
    /// `root` itself excluded.
    pub fn elements_by_tag_name(&self, root: NodeId, name: &str) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            root,
            WalkMode::ExcludeSelf,
            Filter::for_tag_name(name),
            self,
        ))
    }

    /// `root.getElementsByTagNameNS(ns, name)`.
    pub fn elements_by_tag_name_ns(
        &self,
        root: NodeId,
        ns: NsFilter,
        name: &str,
    ) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            root,
            WalkMode::ExcludeSelf,
            Filter::TagNameNs {
                ns,
                name: CompactString::from(name),
            },
            self,
        ))
    }

    /// `root.getElementsByClassName(classes)` — AND over the tokens.
    pub fn elements_by_class_name(&self, root: NodeId, classes: &str) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            root,
            WalkMode::ExcludeSelf,
            Filter::ClassName(CompactString::from(classes)),
            self,
        ))
    }

    /// `document.getElementsByName(name)` — a live `NodeList`.
    pub fn elements_by_name(&self, name: &str) -> NodeList {
        NodeList::live(NodeLive::new(
            self.root,
            WalkMode::ExcludeSelf,
            Filter::Name(CompactString::from(name)),
            self,
        ))
    }

    /// `node.childNodes` — every direct child, any node kind.
    pub fn child_nodes(&self, parent: NodeId) -> NodeList {
        NodeList::child_nodes(ChildNodes::new(parent))
    }

    /// `node.children` — direct element children only.
    pub fn children_collection(&self, parent: NodeId) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            parent,
            WalkMode::Children,
            Filter::Element,
            self,
        ))
    }

    /// `document.all`.
    pub fn all(&self) -> HtmlAllCollection {
        HtmlAllCollection::new(NodeLive::new(
            self.root,
            WalkMode::ExcludeSelf,
            Filter::Element,
            self,
        ))
    }

    /// `document.forms`.
    pub fn forms(&self) -> HtmlCollection {
        self.document_collection(Filter::Tag(TagKind::Form))
    }

    /// `document.links` — `<a>` with `href`.
    pub fn links(&self) -> HtmlCollection {
        self.document_collection(Filter::Links)
    }

    /// `document.anchors` — `<a>` with `name`.
    pub fn anchors(&self) -> HtmlCollection {
        self.document_collection(Filter::Anchors)
    }

    /// `document.images`.
    pub fn images(&self) -> HtmlCollection {
        self.document_collection(Filter::Images)
    }

    /// `document.embeds`.
    pub fn embeds(&self) -> HtmlCollection {
        self.document_collection(Filter::Embeds)
    }

    fn document_collection(&self, filter: Filter) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            self.root,
            WalkMode::ExcludeSelf,
            filter,
            self,
        ))
    }

    /// `select.options`.
    pub fn options(&self, select: NodeId) -> HtmlOptionsCollection {
        HtmlOptionsCollection::new(select, self)
    }

    /// `select.selectedOptions`.
    pub fn selected_options(&self, select: NodeId) -> HtmlCollection {
        HtmlCollection::new(NodeLive::new(
            select,
            WalkMode::ExcludeSelf,
            Filter::SelectedOptions,
            self,
        ))
    }

    /// `form.elements`.
    pub fn form_controls(&self, form: NodeId) -> HtmlFormControlsCollection {
        HtmlFormControlsCollection::new(form, self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(what: &'static str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DomError::Syntax("name is empty"));
    }
    let bad = |b: u8| b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'/' | b'=' | b'"' | b'\'' | b'\0');
    if name.bytes().any(bad) {
        return Err(DomError::InvalidCharacter {
            what,
            value: name.to_string(),
        });
    }
    Ok(())
}
