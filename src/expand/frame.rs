//! The polaroid image frame shared by section and inline stubs.
//!
//! ```html
//! <div class="{frame class}">
//!   <div class="content content--full">
//!     <div class="content-overlay"></div>
//!     <img src=".." class="content-image" loading="lazy" decoding="async" alt="..">
//!     <div class="content-details fadeIn-bottom">
//!       <h3 class="content-title">..</h3>
//!       <p class="content-text">..</p>
//!     </div>
//!   </div>
//!   <p>{caption}</p>
//! </div>
//! ```

use crate::dom::{Document, NodeId};
use crate::stub::StubConfig;

/// Class that marks an image as openable by the site's lightbox script.
pub const LIGHTBOX_CLASS: &str = "js-lightbox";

/// Build a detached frame for `config`'s image.
///
/// Without an image the frame is an empty `<div class="{frame_class}">`; no
/// `<img>` is ever emitted without a source.
pub fn build_frame(doc: &mut Document, frame_class: &str, config: &StubConfig) -> NodeId {
    let frame = doc.create_html_element("div", Some(frame_class));

    let Some(src) = config.image.as_deref() else {
        return frame;
    };

    let content = doc.create_html_element("div", Some("content content--full"));
    let overlay = doc.create_html_element("div", Some("content-overlay"));
    doc.append(content, overlay);

    let img = build_image(doc, src, config);
    doc.append(content, img);

    let heading = config.overlay_heading();
    let body = config.overlay_body();
    if heading.is_some() || body.is_some() {
        let details = doc.create_html_element("div", Some("content-details fadeIn-bottom"));
        if let Some(heading) = heading {
            let h3 = text_element(doc, "h3", Some("content-title"), heading);
            doc.append(details, h3);
        }
        if let Some(body) = body {
            let p = text_element(doc, "p", Some("content-text"), body);
            doc.append(details, p);
        }
        doc.append(content, details);
    }

    doc.append(frame, content);

    if let Some(caption) = config.caption.as_deref() {
        let p = text_element(doc, "p", None, caption);
        doc.append(frame, p);
    }

    frame
}

fn build_image(doc: &mut Document, src: &str, config: &StubConfig) -> NodeId {
    let img = doc.create_html_element("img", Some("content-image"));
    doc.set_attr(img, "src", src);
    // Lightbox images must be decoded before the first click.
    doc.set_attr(img, "loading", if config.lightbox { "eager" } else { "lazy" });
    doc.set_attr(img, "decoding", "async");
    doc.set_attr(img, "alt", config.alt_text());
    if config.lightbox {
        doc.add_class(img, LIGHTBOX_CLASS);
    }
    img
}

fn text_element(doc: &mut Document, tag: &str, class: Option<&str>, text: &str) -> NodeId {
    let el = doc.create_html_element(tag, class);
    let text = doc.create_text(text);
    doc.append(el, text);
    el
}
