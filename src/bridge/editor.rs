//! Rich-text editor binding (Quill, loaded by the page)

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/editor_bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = mountEditor)]
    fn mount_editor(element: &web_sys::HtmlElement, html: &str);

    #[wasm_bindgen(js_name = editorHtml)]
    fn editor_html(element: &web_sys::HtmlElement) -> String;
}

/// Handle to the editor mounted in the form. Mounting a new one replaces
/// the previous instance.
pub struct RichEditor {
    element: web_sys::HtmlElement,
}

impl RichEditor {
    pub fn mount(element: web_sys::HtmlElement, html: &str) -> Self {
        mount_editor(&element, html);
        Self { element }
    }

    pub fn html(&self) -> String {
        editor_html(&self.element)
    }
}
