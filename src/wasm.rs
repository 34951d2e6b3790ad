//! WASM bindings for running the expander in the browser.
//!
//! `runSections` takes and returns a whole document
//! (`document.documentElement.outerHTML`). Body-level markup, such as
//! `document.body.innerHTML` or a partial about to be injected, goes through
//! `runSectionsFragment`, which returns just the expanded fragment.

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Expand every stub in a complete HTML document.
#[wasm_bindgen(js_name = runSections)]
pub fn run_sections(html: &str) -> Result<String, JsValue> {
    crate::expand_html(html).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Expand every stub in a body fragment and return the fragment markup.
#[wasm_bindgen(js_name = runSectionsFragment)]
pub fn run_sections_fragment(html: &str) -> Result<String, JsValue> {
    crate::expand_fragment_html(html).map_err(|e| JsValue::from_str(&e.to_string()))
}
