//! Typed view of a stub's `data-*` attributes.
//!
//! Attribute strings are read exactly once, here. Everything downstream works
//! with [`StubConfig`], [`SectionKind`] and [`FrameSize`].

use crate::dom::{Document, NodeId};

/// Which layout a section stub asks for (`data-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `imgText`: small image beside a larger text column.
    ImgText,
    /// `split50`: large image and text in equal halves.
    Split50,
    /// `twoCol`: two text columns, no image.
    TwoCol,
}

impl SectionKind {
    /// Parse a `data-type` value. Surrounding whitespace is ignored; the name
    /// itself is case-sensitive. Unknown values give `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "imgText" => Some(Self::ImgText),
            "split50" => Some(Self::Split50),
            "twoCol" => Some(Self::TwoCol),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImgText => "imgText",
            Self::Split50 => "split50",
            Self::TwoCol => "twoCol",
        }
    }

    /// Read the kind from an element's `data-type`.
    pub fn of(doc: &Document, id: NodeId) -> Option<Self> {
        doc.get_attr(id, "data-type").and_then(Self::parse)
    }
}

/// Which side the image goes on (`data-img-pos`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePosition {
    Left,
    Right,
}

impl ImagePosition {
    /// Case-insensitive; anything but `left`/`right` gives `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("left") {
            Some(Self::Left)
        } else if value.eq_ignore_ascii_case("right") {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Frame size for inline image stubs (`data-size`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSize {
    /// `sml`
    #[default]
    Small,
    /// `lrg`
    Large,
}

impl FrameSize {
    /// `lrg` (any case) is large; everything else, including absence, is small.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("lrg") => Self::Large,
            _ => Self::Small,
        }
    }

    /// Class of the polaroid frame for this size.
    pub fn frame_class(self) -> &'static str {
        match self {
            Self::Small => "img-text-div-img",
            Self::Large => "lrg-img-text-div-img",
        }
    }
}

/// Everything a stub says about its image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubConfig {
    /// `data-img`, trimmed. `None` when absent or blank.
    pub image: Option<String>,
    /// `data-caption` as written. `None` when absent or empty.
    pub caption: Option<String>,
    /// `data-lightbox="true"`, case-insensitive.
    pub lightbox: bool,
    /// `data-img-pos`, if it names a side.
    pub image_position: Option<ImagePosition>,
    /// `data-overlay-title`, trimmed. `None` when absent or blank.
    pub overlay_title: Option<String>,
    /// `data-overlay-text`, trimmed. `None` when absent or blank.
    pub overlay_text: Option<String>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl StubConfig {
    /// Read the configuration off a stub element.
    pub fn from_element(doc: &Document, id: NodeId) -> Self {
        let attr = |name| doc.get_attr(id, name);

        Self {
            image: trimmed(attr("data-img")),
            caption: attr("data-caption")
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            lightbox: attr("data-lightbox")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            image_position: attr("data-img-pos").and_then(ImagePosition::parse),
            overlay_title: trimmed(attr("data-overlay-title")),
            overlay_text: trimmed(attr("data-overlay-text")),
        }
    }

    /// Caption with surrounding whitespace removed, if anything is left.
    pub fn trimmed_caption(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// The `alt` text: caption, then overlay title, then `Image`.
    pub fn alt_text(&self) -> &str {
        self.trimmed_caption()
            .or(self.overlay_title.as_deref())
            .unwrap_or("Image")
    }

    /// Overlay heading: overlay title, then caption.
    pub fn overlay_heading(&self) -> Option<&str> {
        self.overlay_title
            .as_deref()
            .or_else(|| self.trimmed_caption())
    }

    /// Overlay body: overlay text, then the lightbox prompt if enabled.
    pub fn overlay_body(&self) -> Option<&str> {
        self.overlay_text
            .as_deref()
            .or(self.lightbox.then_some(LIGHTBOX_PROMPT))
    }

    /// Image position, falling back to `default` when unset or unrecognized.
    pub fn position_or(&self, default: ImagePosition) -> ImagePosition {
        self.image_position.unwrap_or(default)
    }
}

/// Overlay body shown on lightbox images without their own overlay text.
pub const LIGHTBOX_PROMPT: &str = "Click to view";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Query, parse_fragment};

    fn config(html: &str) -> StubConfig {
        let doc = parse_fragment(html);
        let stub = Query::parse("div").unwrap().select_first(&doc, doc.root()).unwrap();
        StubConfig::from_element(&doc, stub)
    }

    #[test]
    fn test_section_kind() {
        assert_eq!(SectionKind::parse("imgText"), Some(SectionKind::ImgText));
        assert_eq!(SectionKind::parse(" split50 "), Some(SectionKind::Split50));
        assert_eq!(SectionKind::parse("twoCol"), Some(SectionKind::TwoCol));
        assert_eq!(SectionKind::parse("imgtext"), None);
        assert_eq!(SectionKind::parse(""), None);
    }

    #[test]
    fn test_frame_size() {
        assert_eq!(FrameSize::parse(None), FrameSize::Small);
        assert_eq!(FrameSize::parse(Some("LRG")), FrameSize::Large);
        assert_eq!(FrameSize::parse(Some("huge")), FrameSize::Small);
        assert_eq!(FrameSize::Large.frame_class(), "lrg-img-text-div-img");
    }

    #[test]
    fn test_empty_stub() {
        let cfg = config("<div></div>");
        assert_eq!(cfg, StubConfig::default());
        assert_eq!(cfg.alt_text(), "Image");
        assert_eq!(cfg.overlay_heading(), None);
        assert_eq!(cfg.overlay_body(), None);
    }

    #[test]
    fn test_blank_image_is_none() {
        assert_eq!(config(r#"<div data-img="  "></div>"#).image, None);
    }

    #[test]
    fn test_lightbox_flag() {
        assert!(config(r#"<div data-lightbox="TRUE"></div>"#).lightbox);
        assert!(!config(r#"<div data-lightbox="yes"></div>"#).lightbox);
        assert!(!config(r#"<div data-lightbox=""></div>"#).lightbox);
    }

    #[test]
    fn test_caption_feeds_alt_and_heading() {
        let cfg = config(r#"<div data-caption=" Sunset "></div>"#);
        assert_eq!(cfg.caption.as_deref(), Some(" Sunset "));
        assert_eq!(cfg.alt_text(), "Sunset");
        assert_eq!(cfg.overlay_heading(), Some("Sunset"));
    }

    #[test]
    fn test_overlay_title_precedence() {
        let cfg = config(r#"<div data-caption="Cap" data-overlay-title="Title"></div>"#);
        assert_eq!(cfg.alt_text(), "Cap");
        assert_eq!(cfg.overlay_heading(), Some("Title"));

        let cfg = config(r#"<div data-overlay-title="Title"></div>"#);
        assert_eq!(cfg.alt_text(), "Title");
    }

    #[test]
    fn test_overlay_body_fallback() {
        let cfg = config(r#"<div data-lightbox="true"></div>"#);
        assert_eq!(cfg.overlay_body(), Some(LIGHTBOX_PROMPT));

        let cfg = config(r#"<div data-lightbox="true" data-overlay-text="More"></div>"#);
        assert_eq!(cfg.overlay_body(), Some("More"));
    }

    #[test]
    fn test_image_position() {
        let cfg = config(r#"<div data-img-pos="RIGHT"></div>"#);
        assert_eq!(cfg.position_or(ImagePosition::Left), ImagePosition::Right);

        let cfg = config(r#"<div data-img-pos="top"></div>"#);
        assert_eq!(cfg.image_position, None);
        assert_eq!(cfg.position_or(ImagePosition::Left), ImagePosition::Left);
    }
}
