//! # sectionkit
//!
//! Expands declarative section and image stubs in static HTML pages into the
//! full markup the site's stylesheet expects.
//!
//! ## Stubs
//!
//! - Section stubs: `<div class="section" data-type="imgText|split50|twoCol">`
//! - Inline image stubs: `<div class="img-stub" data-img="...">`
//!
//! Both read `data-img`, `data-caption`, `data-lightbox`, `data-overlay-title`
//! and `data-overlay-text`. Section stubs also read `data-img-pos`; inline
//! stubs read `data-size`. `twoCol` takes its columns from children marked
//! `data-col="left"` and `data-col="right"`.
//!
//! ## Quick Start
//!
//! ```
//! use sectionkit::expand_fragment_html;
//!
//! let html = r#"<div class="section" data-type="split50" data-img="/img/a.jpg"
//!     data-caption="A" data-img-pos="right"><p>Hello</p></div>"#;
//! let out = expand_fragment_html(html).unwrap();
//!
//! assert!(out.starts_with(r#"<div class="div-wrapper"><div class="lrg-img-text-div-wrapper">"#));
//! assert!(out.contains(r#"<div class="lrg-img-text-div-text"><p>Hello</p></div>"#));
//! ```
//!
//! ## Working with Documents
//!
//! For repeated runs, compile the selectors once with [`Expander`] and work on
//! a parsed [`Document`](dom::Document):
//!
//! ```
//! use sectionkit::{Expander, dom};
//!
//! let expander = Expander::new().unwrap();
//! let mut doc = dom::parse_document("<body><div class=\"img-stub\" data-img=\"/x.png\"></div></body>");
//! let report = expander.run(&mut doc);
//! assert_eq!(report.inline_images, 1);
//! ```

pub mod dom;
pub mod error;
pub mod expand;
pub mod stub;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use expand::{ExpandReport, Expander, expand, expand_under};
pub use stub::{FrameSize, ImagePosition, SectionKind, StubConfig};

/// Expand every stub in a complete HTML document.
pub fn expand_html(html: &str) -> Result<String> {
    let mut doc = dom::parse_document(html);
    expand(&mut doc)?;
    doc.to_html()
}

/// Expand every stub in a body fragment, such as a partial that is injected
/// into a page after load. Only the fragment's own markup is returned.
pub fn expand_fragment_html(html: &str) -> Result<String> {
    let mut doc = dom::parse_fragment(html);
    expand(&mut doc)?;
    match doc.body() {
        Some(body) => doc.inner_html(body),
        None => Ok(String::new()),
    }
}

/// Decode raw page bytes, honouring a declared charset.
///
/// The text is UTF-8 from here on; pair this with [`declare_utf8`] before
/// writing the page back out.
pub fn decode_page(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    util::decode_text(bytes, util::sniff_charset(bytes))
}

/// Point every `<meta>` charset declaration at UTF-8, the encoding the
/// serializer writes. Declarations already naming UTF-8 are left as they are.
///
/// Returns how many declarations were rewritten.
pub fn declare_utf8(doc: &mut dom::Document) -> Result<usize> {
    let mut rewritten = 0;

    for meta in dom::Query::parse("meta[charset]")?.select_all(doc, doc.root()) {
        if !doc.get_attr(meta, "charset").is_some_and(util::is_utf8_label) {
            doc.set_attr(meta, "charset", "utf-8");
            rewritten += 1;
        }
    }

    for meta in dom::Query::parse("meta[http-equiv][content]")?.select_all(doc, doc.root()) {
        let is_content_type = doc
            .get_attr(meta, "http-equiv")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"));
        let legacy = doc
            .get_attr(meta, "content")
            .and_then(util::content_charset)
            .is_some_and(|label| !util::is_utf8_label(label));
        if is_content_type && legacy {
            doc.set_attr(meta, "content", "text/html; charset=utf-8");
            rewritten += 1;
        }
    }

    if rewritten > 0 {
        tracing::debug!(rewritten, "charset declarations now name utf-8");
    }
    Ok(rewritten)
}
