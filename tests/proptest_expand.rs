//! Property tests for the expansion pass.

use proptest::prelude::*;
use sectionkit::dom::{Document, Query, parse_fragment};
use sectionkit::{Expander, expand};

fn count(doc: &Document, selector: &str) -> usize {
    Query::parse(selector).unwrap().select_all(doc, doc.root()).len()
}

fn section_kind() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("imgText"), Just("split50"), Just("twoCol")]
}

fn image_pos() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("left"), Just("right"), Just("RIGHT"), Just("middle"), Just("")]
}

fn stub_html(kind: &str, img: &str, caption: &str, pos: &str, lightbox: bool, body: &str) -> String {
    let inner = if kind == "twoCol" {
        format!(r#"<div data-col="left"><p id="body">{body}</p></div><div data-col="right">r</div>"#)
    } else {
        format!(r#"<p id="body">{body}</p>"#)
    };
    format!(
        r#"<div class="section" data-type="{kind}" data-img="{img}" data-caption="{caption}" data-img-pos="{pos}" data-lightbox="{lightbox}">{inner}</div>"#
    )
}

proptest! {
    #[test]
    fn body_content_survives_exactly_once(
        kind in section_kind(),
        caption in "[A-Z ]{0,16}",
        pos in image_pos(),
        lightbox in any::<bool>(),
        body in "[a-z]{1,12}( [a-z]{1,12}){0,4}",
    ) {
        let mut doc = parse_fragment(&stub_html(&kind, "/a.jpg", &caption, &pos, lightbox, &body));
        expand(&mut doc).unwrap();

        let bodies = Query::parse("#body").unwrap().select_all(&doc, doc.root());
        prop_assert_eq!(bodies.len(), 1);
        prop_assert_eq!(doc.text(bodies[0]), body);
        prop_assert_eq!(count(&doc, ".section"), 0);
    }

    #[test]
    fn no_image_means_no_img(
        kind in section_kind(),
        img in " {0,3}",
        caption in "[A-Za-z ]{0,16}",
        pos in image_pos(),
        lightbox in any::<bool>(),
    ) {
        let html = format!(
            "{}<div class=\"img-stub\" data-img=\"{img}\" data-caption=\"{caption}\" data-lightbox=\"{lightbox}\"></div>",
            stub_html(&kind, &img, &caption, &pos, lightbox, "text"),
        );
        let mut doc = parse_fragment(&html);
        expand(&mut doc).unwrap();

        prop_assert_eq!(count(&doc, "img"), 0);
        prop_assert_eq!(count(&doc, ".img-stub"), 0);
    }

    #[test]
    fn second_pass_is_a_noop(
        kind in section_kind(),
        caption in "[A-Za-z ]{0,16}",
        pos in image_pos(),
        lightbox in any::<bool>(),
    ) {
        let mut doc = parse_fragment(&stub_html(&kind, "/p.jpg", &caption, &pos, lightbox, "text"));
        let expander = Expander::new().unwrap();
        expander.run(&mut doc);
        let first = doc.to_html().unwrap();

        let report = expander.run(&mut doc);
        prop_assert!(report.is_noop());
        prop_assert_eq!(doc.to_html().unwrap(), first);
    }

    #[test]
    fn lightbox_images_are_always_eager(
        kind in prop_oneof![Just("imgText"), Just("split50")],
        caption in "[A-Za-z ]{0,16}",
        pos in image_pos(),
    ) {
        let mut doc = parse_fragment(&stub_html(&kind, "/l.jpg", &caption, &pos, true, "text"));
        expand(&mut doc).unwrap();

        prop_assert_eq!(count(&doc, "img.js-lightbox"), 1);
        prop_assert_eq!(count(&doc, r#"img.js-lightbox[loading="eager"][decoding="async"]"#), 1);
    }
}
