//! Element payload: tag classification plus attribute storage.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::tag::{Namespace, TagKind};

/// An ordered collection of attributes with first-wins parse semantics.
///
/// When parsing HTML, if an attribute appears multiple times, only the first
/// occurrence is kept (matching browser behavior). Explicit `set` replaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    entries: SmallVec<[(CompactString, CompactString); 4]>,
}

impl AttrList {
    /// Create a new empty attribute collection.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Create from an iterator of (name, value) pairs, keeping only the
    /// first occurrence of each name.
    pub fn collect_from<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (CompactString, CompactString)>,
    {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.set_if_missing(name, value);
        }
        attrs
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute value. If the attribute already exists, updates it.
    pub fn set(&mut self, name: CompactString, value: CompactString) {
        if let Some((_, v)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Set an attribute only if it doesn't already exist.
    pub fn set_if_missing(&mut self, name: CompactString, value: CompactString) {
        if !self.contains(&name) {
            self.entries.push((name, value));
        }
    }

    /// Remove an attribute by name. Returns the old value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<CompactString> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate over all attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The element payload of a node: namespace, classified tag, attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    ns: Namespace,
    tag: TagKind,
    /// Local name. Lowercase for HTML-namespace elements, case-preserved
    /// for foreign content.
    name: CompactString,
    attrs: AttrList,
}

impl ElementData {
    /// Create an element payload. HTML-namespace names are lowercased and
    /// classified once; `tag()` is an enum compare from then on.
    pub fn new(ns: Namespace, name: &str) -> Self {
        let name = if ns == Namespace::Html && name.bytes().any(|b| b.is_ascii_uppercase()) {
            CompactString::from(name.to_ascii_lowercase())
        } else {
            CompactString::from(name)
        };
        let tag = if ns == Namespace::Html {
            TagKind::from_name(&name)
        } else {
            TagKind::Unknown
        };
        Self {
            ns,
            tag,
            name,
            attrs: AttrList::new(),
        }
    }

    /// Create with an initial attribute list (first-wins).
    pub fn with_attrs<I>(ns: Namespace, name: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = (CompactString, CompactString)>,
    {
        let mut data = Self::new(ns, name);
        data.attrs = AttrList::collect_from(attrs);
        data
    }

    pub fn ns(&self) -> Namespace {
        self.ns
    }

    /// The classified tag. O(1); `Unknown` for custom/foreign elements.
    pub fn tag(&self) -> TagKind {
        self.tag
    }

    /// The local tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value. No allocation.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Check attribute presence.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains(name)
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> &AttrList {
        &self.attrs
    }

    /// The element's `id`, if it has a non-empty one.
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").filter(|id| !id.is_empty())
    }

    pub(crate) fn set_attr(&mut self, name: CompactString, value: CompactString) {
        self.attrs.set(name, value);
    }

    pub(crate) fn set_attr_if_missing(&mut self, name: CompactString, value: CompactString) {
        self.attrs.set_if_missing(name, value);
    }

    pub(crate) fn remove_attr(&mut self, name: &str) -> Option<CompactString> {
        self.attrs.remove(name)
    }

    /// Whether the element's `class` attribute contains `token`
    /// (ASCII-whitespace tokenization).
    pub fn has_class(&self, token: &str) -> bool {
        match self.attrs.get("class") {
            Some(classes) => classes.split_ascii_whitespace().any(|c| c == token),
            None => false,
        }
    }
}
