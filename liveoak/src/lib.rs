//! Arena-based DOM with live collections and html5ever parsing.
//!
//! liveoak provides:
//! - **Arena DOM**: all nodes of a document in one arena, linked by
//!   parent/child/sibling handles, mutated in place
//! - **Live collections**: `getElementsByTagName`-style views that always
//!   reflect the current tree, with cached cursors invalidated by a single
//!   document-wide version counter
//! - **Parsing**: browser-compatible HTML5 parsing via html5ever with full
//!   error recovery
//! - **Serialization**: HTML5-correct output with proper escaping
//!
//! # Example
//!
//! ```rust
//! use liveoak::parse_document;
//!
//! let mut doc = parse_document("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
//! let body = doc.body().unwrap();
//!
//! // a live collection: it tracks later mutations of the tree
//! let mut items = doc.elements_by_tag_name(body, "li");
//! assert_eq!(items.length(&doc), 2);
//!
//! let first = items.item(0, &doc).unwrap();
//! assert_eq!(doc.text_content(first), "a");
//!
//! let ul = doc.arena().parent(first).unwrap();
//! let li = doc.create_element(liveoak::Namespace::Html, "li", []).unwrap();
//! doc.append_child(ul, li).unwrap();
//! assert_eq!(items.length(&doc), 3);
//! ```

mod tracing_macros;

pub mod arena;
pub mod collections;
pub mod document;
pub mod element;
pub mod error;
pub mod live;
mod parser;
pub mod selector;
pub mod serialize;
pub mod tag;
pub mod walker;

// Re-export parsing
pub use parser::parse_document;

// Re-export serialization
pub use serialize::{inner_html, outer_html, serialize_document};

// Re-export core types at crate root for convenience
pub use arena::{Arena, NodeId, NodeKind};
pub use collections::{
    AllArg, ChildNodes, DomTokenList, HtmlAllCollection, HtmlCollection,
    HtmlFormControlsCollection, HtmlOptionsCollection, NamedItem, NodeList, RadioNodeList,
};
pub use document::Document;
pub use element::{AttrList, ElementData};
pub use error::DomError;
pub use live::{Filter, NodeLive, NsFilter};
pub use selector::{SelectorEngine, SelectorList};
pub use tag::{Namespace, TagKind};
pub use walker::{TreeWalker, WalkMode};
