//! Arena DOM: parsing, mutation, selector queries and serialization.
//!
//! ```
//! use sectionkit::dom::{Query, parse_fragment};
//!
//! let doc = parse_fragment(r#"<div class="section" data-type="twoCol"></div>"#);
//! let stubs = Query::parse(".section[data-type]").unwrap();
//! assert_eq!(stubs.select_all(&doc, doc.root()).len(), 1);
//! ```

mod arena;
mod select;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Document, Node, NodeData, NodeId};
pub use select::{ElementRef, Query, StubSelectors};
pub use serialize::SerializableNode;

use html5ever::driver::ParseOpts;
use html5ever::parse_document as html5ever_parse;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

use tree_sink::DocumentSink;

/// Parse a complete HTML document.
///
/// Parsing never fails; malformed markup is repaired the way a browser would.
pub fn parse_document(html: &str) -> Document {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    html5ever_parse(DocumentSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes())
        .into_document()
}

/// Parse a partial (a body fragment, no `<html>` or `<body>`).
///
/// The fragment is wrapped in a minimal document; use [`Document::body`] to
/// get at its content.
pub fn parse_fragment(html: &str) -> Document {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    parse_document(&wrapped)
}

impl Document {
    /// The `<body>` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.find_by_tag("body")
    }
}
