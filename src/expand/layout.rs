//! Section layout builders.
//!
//! Each builder consumes a section stub's content and returns a detached
//! `div.div-wrapper` ready to take the stub's place.

use crate::dom::{Document, NodeId, Query};
use crate::stub::{ImagePosition, SectionKind, StubConfig};

use super::frame::build_frame;

/// Class hook added to a media layout container depending on image side.
#[derive(Debug, Clone, Copy)]
enum SideMarker {
    /// Added when the image is on the right.
    WhenRight(&'static str),
    /// Added when the image is on the left.
    WhenLeft(&'static str),
}

/// Classes for an image-plus-text layout.
#[derive(Debug, Clone, Copy)]
struct MediaLayout {
    container: &'static str,
    image: &'static str,
    text: &'static str,
    marker: SideMarker,
    default_position: ImagePosition,
}

const IMG_TEXT: MediaLayout = MediaLayout {
    container: "img-text-div-wrapper",
    image: "img-text-div-img",
    text: "img-text-div-text",
    marker: SideMarker::WhenRight("reverse"),
    default_position: ImagePosition::Left,
};

const SPLIT_50: MediaLayout = MediaLayout {
    container: "lrg-img-text-div-wrapper",
    image: "lrg-img-text-div-img",
    text: "lrg-img-text-div-text",
    marker: SideMarker::WhenLeft("img-left"),
    default_position: ImagePosition::Left,
};

const TWO_COL_CONTAINER: &str = "two-text-columns-wrapper";
const TWO_COL_LEFT: &str = "two-text-columns-text-left";
const TWO_COL_RIGHT: &str = "two-text-columns-text-right";

/// Donor selectors for `twoCol` stubs.
#[derive(Debug, Clone)]
pub(crate) struct ColumnQueries {
    pub left: Query,
    pub right: Query,
}

/// Build the replacement for a section stub of the given kind.
pub(crate) fn build_section(
    doc: &mut Document,
    stub: NodeId,
    kind: SectionKind,
    columns: &ColumnQueries,
) -> NodeId {
    match kind {
        SectionKind::ImgText => build_media(doc, stub, &IMG_TEXT),
        SectionKind::Split50 => build_media(doc, stub, &SPLIT_50),
        SectionKind::TwoCol => build_two_col(doc, stub, columns),
    }
}

fn build_media(doc: &mut Document, stub: NodeId, layout: &MediaLayout) -> NodeId {
    let config = StubConfig::from_element(doc, stub);
    let position = config.position_or(layout.default_position);

    let container = doc.create_html_element("div", Some(layout.container));
    match (layout.marker, position) {
        (SideMarker::WhenRight(class), ImagePosition::Right)
        | (SideMarker::WhenLeft(class), ImagePosition::Left) => doc.add_class(container, class),
        _ => {}
    }

    let text_col = doc.create_html_element("div", Some(layout.text));
    doc.move_children(stub, text_col);

    let image_col = config
        .image
        .is_some()
        .then(|| build_frame(doc, layout.image, &config));

    match position {
        ImagePosition::Right => {
            doc.append(container, text_col);
            if let Some(image_col) = image_col {
                doc.append(container, image_col);
            }
        }
        ImagePosition::Left => {
            if let Some(image_col) = image_col {
                doc.append(container, image_col);
            }
            doc.append(container, text_col);
        }
    }

    wrap(doc, container)
}

fn build_two_col(doc: &mut Document, stub: NodeId, columns: &ColumnQueries) -> NodeId {
    let container = doc.create_html_element("div", Some(TWO_COL_CONTAINER));

    for (query, class) in [(&columns.left, TWO_COL_LEFT), (&columns.right, TWO_COL_RIGHT)] {
        let column = doc.create_html_element("div", Some(class));
        if let Some(donor) = query.select_first(doc, stub) {
            doc.move_children(donor, column);
        }
        doc.append(container, column);
    }

    wrap(doc, container)
}

fn wrap(doc: &mut Document, inner: NodeId) -> NodeId {
    let outer = doc.create_html_element("div", Some("div-wrapper"));
    doc.append(outer, inner);
    outer
}
