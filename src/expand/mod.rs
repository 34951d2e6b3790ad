//! The expansion pass.
//!
//! A pass runs in three ordered steps over a subtree:
//!
//! 1. every `.section[data-type]` stub is replaced by its layout,
//! 2. every `.img-stub[data-img]` stub is replaced by an image frame, which
//!    includes inline stubs that step 1 moved into section output,
//! 3. every `img.js-lightbox` missing `loading`/`decoding` gets
//!    `eager`/`async`.
//!
//! Stubs are consumed by replacement, so running a second pass over the same
//! document changes nothing.

mod frame;
mod layout;

pub use frame::{LIGHTBOX_CLASS, build_frame};

use serde::Serialize;

use crate::dom::{Document, NodeId, Query};
use crate::error::Result;
use crate::stub::{FrameSize, SectionKind, StubConfig};
use layout::{ColumnQueries, build_section};

/// Selector for section stubs.
pub const SECTION_STUB_SELECTOR: &str = ".section[data-type]";
/// Selector for inline image stubs.
pub const INLINE_STUB_SELECTOR: &str = ".img-stub[data-img]";
/// Selector for images the lightbox script will pick up.
pub const LIGHTBOX_IMAGE_SELECTOR: &str = "img.js-lightbox";

/// What a pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpandReport {
    /// Section stubs replaced.
    pub sections: usize,
    /// Section stubs left alone because their `data-type` is unknown.
    pub skipped: usize,
    /// Inline image stubs replaced.
    pub inline_images: usize,
    /// Lightbox images that gained a `loading` or `decoding` attribute.
    pub normalized_images: usize,
}

impl ExpandReport {
    /// True when the pass did not touch the document.
    pub fn is_noop(&self) -> bool {
        self.sections == 0 && self.inline_images == 0 && self.normalized_images == 0
    }
}

impl std::ops::AddAssign for ExpandReport {
    fn add_assign(&mut self, rhs: Self) {
        self.sections += rhs.sections;
        self.skipped += rhs.skipped;
        self.inline_images += rhs.inline_images;
        self.normalized_images += rhs.normalized_images;
    }
}

/// Compiled stub queries. Build once, run over as many documents as needed.
#[derive(Debug, Clone)]
pub struct Expander {
    sections: Query,
    inline: Query,
    lightbox: Query,
    columns: ColumnQueries,
}

impl Expander {
    pub fn new() -> Result<Self> {
        Ok(Self {
            sections: Query::parse(SECTION_STUB_SELECTOR)?,
            inline: Query::parse(INLINE_STUB_SELECTOR)?,
            lightbox: Query::parse(LIGHTBOX_IMAGE_SELECTOR)?,
            columns: ColumnQueries {
                left: Query::parse(r#"[data-col="left"]"#)?,
                right: Query::parse(r#"[data-col="right"]"#)?,
            },
        })
    }

    /// Expand every stub in the document.
    pub fn run(&self, doc: &mut Document) -> ExpandReport {
        let root = doc.root();
        self.run_under(doc, root)
    }

    /// Expand the stubs below `root`. `root` itself is never replaced.
    pub fn run_under(&self, doc: &mut Document, root: NodeId) -> ExpandReport {
        let mut report = ExpandReport::default();
        self.expand_sections(doc, root, &mut report);
        self.expand_inline_images(doc, root, &mut report);
        self.normalize_lightbox_images(doc, root, &mut report);

        tracing::debug!(
            sections = report.sections,
            skipped = report.skipped,
            inline_images = report.inline_images,
            normalized_images = report.normalized_images,
            "expansion pass finished"
        );
        report
    }

    /// Count stubs a pass would expand, without touching the document.
    pub fn pending(&self, doc: &Document, root: NodeId) -> usize {
        let sections = self
            .sections
            .select_all(doc, root)
            .into_iter()
            .filter(|&stub| SectionKind::of(doc, stub).is_some())
            .count();
        sections + self.inline.select_all(doc, root).len()
    }

    fn expand_sections(&self, doc: &mut Document, root: NodeId, report: &mut ExpandReport) {
        for stub in self.sections.select_all(doc, root) {
            // A stub dropped along with an enclosing twoCol stub is gone.
            if !doc.is_inclusive_descendant(stub, root) {
                continue;
            }

            let Some(kind) = SectionKind::of(doc, stub) else {
                tracing::debug!(
                    data_type = doc.get_attr(stub, "data-type").unwrap_or_default(),
                    "unknown section type, leaving stub as is"
                );
                report.skipped += 1;
                continue;
            };

            let built = build_section(doc, stub, kind, &self.columns);
            doc.replace(stub, built);
            tracing::trace!(kind = kind.as_str(), "expanded section stub");
            report.sections += 1;
        }
    }

    fn expand_inline_images(&self, doc: &mut Document, root: NodeId, report: &mut ExpandReport) {
        for stub in self.inline.select_all(doc, root) {
            if !doc.is_inclusive_descendant(stub, root) {
                continue;
            }

            let config = StubConfig::from_element(doc, stub);
            let size = FrameSize::parse(doc.get_attr(stub, "data-size"));
            let built = build_frame(doc, size.frame_class(), &config);
            doc.replace(stub, built);
            tracing::trace!(src = config.image.as_deref().unwrap_or_default(), "expanded image stub");
            report.inline_images += 1;
        }
    }

    fn normalize_lightbox_images(
        &self,
        doc: &mut Document,
        root: NodeId,
        report: &mut ExpandReport,
    ) {
        for img in self.lightbox.select_all(doc, root) {
            let mut touched = false;
            if !doc.has_attr(img, "loading") {
                doc.set_attr(img, "loading", "eager");
                touched = true;
            }
            if !doc.has_attr(img, "decoding") {
                doc.set_attr(img, "decoding", "async");
                touched = true;
            }
            if touched {
                report.normalized_images += 1;
            }
        }
    }
}

/// Expand every stub in `doc` with a default [`Expander`].
pub fn expand(doc: &mut Document) -> Result<ExpandReport> {
    Ok(Expander::new()?.run(doc))
}

/// Expand the stubs below `root` with a default [`Expander`].
///
/// For callers that splice new stub-bearing markup into an already expanded
/// page and need to run the pass again on just that part.
pub fn expand_under(doc: &mut Document, root: NodeId) -> Result<ExpandReport> {
    Ok(Expander::new()?.run_under(doc, root))
}
