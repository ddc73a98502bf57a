//! Live filtered views over the node graph.
//!
//! A `NodeLive` pairs a [`TreeWalker`] with a [`Filter`] and a small cache
//! (last served index, cached length) stamped with the document's mutation
//! version. Every query first compares the stamp: if the tree changed, the
//! cursor and caches are thrown away before anything is read. If it didn't,
//! a request for an index at or past the last served one resumes from the
//! cursor instead of rescanning from the root — the pattern that makes
//! `for (i = 0; i < len; i++)` loops over a collection linear instead of
//! quadratic.

use compact_str::CompactString;

use crate::arena::NodeId;
use crate::document::Document;
use crate::element::ElementData;
use crate::tag::{Namespace, TagKind};
use crate::walker::{TreeWalker, WalkMode};

/// Namespace constraint for qualified tag-name lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsFilter {
    /// `"*"` — any namespace.
    Any,
    Ns(Namespace),
}

impl NsFilter {
    fn matches(&self, ns: Namespace) -> bool {
        match self {
            NsFilter::Any => true,
            NsFilter::Ns(want) => *want == ns,
        }
    }
}

/// Membership test applied to each node a walker visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every element.
    Element,
    /// Classified tag equality — one enum compare.
    Tag(TagKind),
    /// Tag-name compare: case-insensitive for HTML-namespace elements,
    /// case-sensitive for foreign content.
    TagName(CompactString),
    /// Tag name within a namespace; both sides accept `"*"`.
    TagNameNs {
        ns: NsFilter,
        name: CompactString,
    },
    /// Every token of the query (ASCII-whitespace split) must be present
    /// in the element's `class` attribute.
    ClassName(CompactString),
    /// Exact `name` attribute match.
    Name(CompactString),
    /// Listed form controls owned by the given `<form>`: either an explicit
    /// `form` attribute equal to the form's id, or no `form` attribute and
    /// a position inside the form's subtree.
    FormControls(NodeId),
    /// Form controls of the given form whose id or `name` equals `name`
    /// (the radio-group view).
    FormControlsNamed {
        form: NodeId,
        name: CompactString,
    },
    /// `<option>` elements whose selected flag is set.
    SelectedOptions,
    /// `<a>` elements with an `href` attribute.
    Links,
    /// `<a>` elements with a `name` attribute.
    Anchors,
    /// `<img>` elements.
    Images,
    /// `<embed>` elements.
    Embeds,
}

impl Filter {
    /// The filter `getElementsByTagName(name)` wants: `"*"` means every
    /// element, a well-known tag gets the O(1) enum compare, anything else
    /// falls back to string comparison.
    pub fn for_tag_name(name: &str) -> Filter {
        if name == "*" {
            return Filter::Element;
        }
        match TagKind::from_name(&name.to_ascii_lowercase()) {
            TagKind::Unknown => Filter::TagName(CompactString::from(name)),
            tag => Filter::Tag(tag),
        }
    }

    /// Does `id` belong to the view this filter defines?
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(el) = doc.element(id) else {
            return false;
        };
        match self {
            Filter::Element => true,
            Filter::Tag(tag) => el.tag() == *tag,
            Filter::TagName(name) => tag_name_matches(el, name),
            Filter::TagNameNs { ns, name } => {
                ns.matches(el.ns()) && (name == "*" || tag_name_matches(el, name))
            }
            Filter::ClassName(classes) => {
                let mut tokens = classes.split_ascii_whitespace().peekable();
                tokens.peek().is_some() && tokens.all(|t| el.has_class(t))
            }
            Filter::Name(name) => el.attr("name") == Some(name.as_str()),
            Filter::FormControls(form) => is_form_control_of(doc, *form, id, el),
            Filter::FormControlsNamed { form, name } => {
                is_form_control_of(doc, *form, id, el)
                    && (el.id() == Some(name.as_str())
                        || el.attr("name") == Some(name.as_str()))
            }
            Filter::SelectedOptions => {
                el.tag() == TagKind::Option && el.has_attr("selected")
            }
            Filter::Links => el.tag() == TagKind::A && el.has_attr("href"),
            Filter::Anchors => el.tag() == TagKind::A && el.has_attr("name"),
            Filter::Images => el.tag() == TagKind::Img,
            Filter::Embeds => el.tag() == TagKind::Embed,
        }
    }
}

fn tag_name_matches(el: &ElementData, name: &str) -> bool {
    if el.ns() == Namespace::Html {
        el.name().eq_ignore_ascii_case(name)
    } else {
        el.name() == name
    }
}

fn is_form_control_of(doc: &Document, form: NodeId, id: NodeId, el: &ElementData) -> bool {
    if !el.tag().is_listed_control() {
        return false;
    }
    // input type=image is listed but excluded from form.elements
    if el.tag() == TagKind::Input
        && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("image"))
    {
        return false;
    }
    match el.attr("form") {
        Some(owner) => {
            !owner.is_empty()
                && doc.element(form).and_then(|f| f.id()) == Some(owner)
        }
        // No form attribute: owned by structural position. O(depth) per
        // candidate; known hot path for very large forms.
        None => doc.arena().contains(form, id),
    }
}

/// A live filtered view: walker + filter + version-stamped cache.
#[derive(Debug, Clone)]
pub struct NodeLive {
    walker: TreeWalker,
    filter: Filter,
    /// Index the cursor will serve next: the node at `last_index` is the
    /// next match the walker yields.
    last_index: u32,
    cached_length: Option<u32>,
    cached_version: Option<u64>,
}

impl NodeLive {
    pub fn new(root: NodeId, mode: WalkMode, filter: Filter, doc: &Document) -> Self {
        Self {
            walker: TreeWalker::new(root, mode, doc.arena()),
            filter,
            last_index: 0,
            cached_length: None,
            cached_version: None,
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn root(&self) -> NodeId {
        self.walker.root()
    }

    /// Throw away every cache if the tree changed since they were taken.
    fn revalidate(&mut self, doc: &Document) {
        let version = doc.version();
        if self.cached_version != Some(version) {
            self.walker.reset(doc.arena());
            self.last_index = 0;
            self.cached_length = None;
            self.cached_version = Some(version);
        }
    }

    /// Advance the internal cursor to the next filter-matching node.
    fn next_matching(&mut self, doc: &Document) -> Option<NodeId> {
        loop {
            let node = self.walker.next(doc.arena())?;
            if self.filter.matches(doc, node) {
                return Some(node);
            }
        }
    }

    /// Advance a caller-supplied cursor to the next filter-matching node,
    /// leaving the view's own cursor alone.
    pub fn advance(&self, walker: &mut TreeWalker, doc: &Document) -> Option<NodeId> {
        loop {
            let node = walker.next(doc.arena())?;
            if self.filter.matches(doc, node) {
                return Some(node);
            }
        }
    }

    /// Number of matching nodes. O(1) when cached for the current version;
    /// otherwise one full walk over an independent cursor.
    pub fn length(&mut self, doc: &Document) -> u32 {
        self.revalidate(doc);
        if let Some(len) = self.cached_length {
            return len;
        }
        let mut walker = self.walker.cloned_from_start(doc.arena());
        let mut count = 0u32;
        while self.advance(&mut walker, doc).is_some() {
            count += 1;
        }
        self.cached_length = Some(count);
        count
    }

    /// The `index`-th matching node in tree order.
    ///
    /// A request at or past the last served index resumes from the cursor;
    /// a backward request resets to the start first. Either way the result
    /// is exactly what a fresh scan from the root would return.
    pub fn get_at_index(&mut self, index: u32, doc: &Document) -> Option<NodeId> {
        self.revalidate(doc);
        if index < self.last_index {
            self.walker.reset(doc.arena());
            self.last_index = 0;
        }
        let mut current = self.last_index;
        while let Some(node) = self.next_matching(doc) {
            if current == index {
                self.last_index = current + 1;
                return Some(node);
            }
            current += 1;
        }
        self.last_index = current;
        None
    }

    /// Named lookup: the document id index first (checked against this
    /// view's subtree and filter), then a linear scan over `name`
    /// attributes with an independent cursor.
    pub fn get_by_name(&self, name: &str, doc: &Document) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }
        if let Some(el) = doc.get_element_by_id(name)
            && self.walker.contains(doc.arena(), el)
            && self.filter.matches(doc, el)
        {
            return Some(el);
        }
        let mut walker = self.walker.cloned_from_start(doc.arena());
        while let Some(node) = self.advance(&mut walker, doc) {
            if doc
                .element(node)
                .is_some_and(|e| e.attr("name") == Some(name))
            {
                return Some(node);
            }
        }
        None
    }

    /// Iterate matching nodes over an independent cursor.
    pub fn iter<'a>(&'a self, doc: &'a Document) -> LiveIter<'a> {
        LiveIter {
            doc,
            walker: self.walker.cloned_from_start(doc.arena()),
            filter: &self.filter,
        }
    }

    #[cfg(test)]
    pub(crate) fn walker_resets(&self) -> u32 {
        self.walker.reset_count
    }
}

/// Iterator over a live view's matching nodes.
pub struct LiveIter<'a> {
    doc: &'a Document,
    walker: TreeWalker,
    filter: &'a Filter,
}

impl Iterator for LiveIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.walker.next(self.doc.arena())?;
            if self.filter.matches(self.doc, node) {
                return Some(node);
            }
        }
    }
}
