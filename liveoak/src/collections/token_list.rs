//! `element.classList` — an ordered-unique token view over an attribute.
//!
//! Not walker-based: the list re-parses the attribute string on every call
//! and writes the joined result back on mutation. One subtlety worth
//! stating: an attribute that exists with an empty value and an attribute
//! that does not exist are different observable states, and mutations must
//! not conflate them.

use compact_str::CompactString;

use crate::arena::NodeId;
use crate::document::Document;
use crate::error::{DomError, Result};

/// Live token-list view over one element's attribute (`class` for
/// `classList`).
#[derive(Debug, Clone)]
pub struct DomTokenList {
    element: NodeId,
    attr: CompactString,
}

impl DomTokenList {
    /// The `classList` view.
    pub fn class_list(element: NodeId) -> Self {
        Self::new(element, "class")
    }

    /// A token-list view over an arbitrary attribute (`rel`, `sandbox`, …).
    pub fn new(element: NodeId, attr: &str) -> Self {
        Self {
            element,
            attr: CompactString::from(attr),
        }
    }

    /// The raw attribute value, if the attribute exists.
    pub fn value<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        doc.element(self.element)?.attr(&self.attr)
    }

    /// Ordered-unique tokens of the current attribute value.
    pub fn tokens<'a>(&self, doc: &'a Document) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        if let Some(raw) = self.value(doc) {
            for token in raw.split_ascii_whitespace() {
                if !out.contains(&token) {
                    out.push(token);
                }
            }
        }
        out
    }

    pub fn len(&self, doc: &Document) -> u32 {
        self.tokens(doc).len() as u32
    }

    pub fn is_empty(&self, doc: &Document) -> bool {
        self.tokens(doc).is_empty()
    }

    pub fn item<'a>(&self, index: u32, doc: &'a Document) -> Option<&'a str> {
        self.tokens(doc).get(index as usize).copied()
    }

    pub fn contains(&self, token: &str, doc: &Document) -> bool {
        self.tokens(doc).iter().any(|t| *t == token)
    }

    /// Add tokens not already present, in argument order. All tokens are
    /// validated before anything is mutated.
    pub fn add(&self, doc: &mut Document, tokens: &[&str]) -> Result<()> {
        for token in tokens {
            validate_token(token)?;
        }
        let mut current = owned_tokens(self, doc);
        for token in tokens {
            if !current.iter().any(|t| t == token) {
                current.push(CompactString::from(*token));
            }
        }
        self.persist(doc, &current)
    }

    /// Remove the given tokens. All tokens are validated before anything
    /// is mutated.
    pub fn remove(&self, doc: &mut Document, tokens: &[&str]) -> Result<()> {
        for token in tokens {
            validate_token(token)?;
        }
        let mut current = owned_tokens(self, doc);
        current.retain(|t| !tokens.contains(&t.as_str()));
        self.persist(doc, &current)
    }

    /// Toggle a token; `force` pins the direction. Returns whether the
    /// token is present afterwards.
    pub fn toggle(&self, doc: &mut Document, token: &str, force: Option<bool>) -> Result<bool> {
        validate_token(token)?;
        if self.contains(token, doc) {
            if force == Some(true) {
                return Ok(true);
            }
            self.remove(doc, &[token])?;
            Ok(false)
        } else {
            if force == Some(false) {
                return Ok(false);
            }
            self.add(doc, &[token])?;
            Ok(true)
        }
    }

    /// Replace `old` with `new` at `old`'s position. Returns `false` (and
    /// leaves the attribute alone) when `old` is absent.
    pub fn replace(&self, doc: &mut Document, old: &str, new: &str) -> Result<bool> {
        validate_token(old)?;
        validate_token(new)?;
        let mut current = owned_tokens(self, doc);
        let Some(pos) = current.iter().position(|t| t == old) else {
            return Ok(false);
        };
        current[pos] = CompactString::from(new);
        // collapse a duplicate of `new` elsewhere in the list
        let mut seen_first = false;
        current.retain(|t| {
            if t == new {
                if seen_first {
                    return false;
                }
                seen_first = true;
            }
            true
        });
        self.persist(doc, &current)?;
        Ok(true)
    }

    /// Replace the whole attribute value.
    pub fn set_value(&self, doc: &mut Document, value: &str) -> Result<()> {
        doc.set_attr(self.element, &self.attr, value)
    }

    fn persist(&self, doc: &mut Document, tokens: &[CompactString]) -> Result<()> {
        let had_attr = self.value(doc).is_some();
        let joined = tokens.join(" ");
        // never materialize an attribute just to store nothing, but keep a
        // present-but-empty attribute present
        if joined.is_empty() && !had_attr {
            return Ok(());
        }
        doc.set_attr(self.element, &self.attr, &joined)
    }
}

fn owned_tokens(list: &DomTokenList, doc: &Document) -> Vec<CompactString> {
    list.tokens(doc)
        .into_iter()
        .map(CompactString::from)
        .collect()
}

fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(DomError::Syntax("token is empty"));
    }
    if token.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(DomError::InvalidCharacter {
            what: "token",
            value: token.to_string(),
        });
    }
    Ok(())
}
