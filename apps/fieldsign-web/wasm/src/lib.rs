//! fieldsign - PDF field-placement editor, browser shell.
//!
//! The JS host owns PDF rendering and DOM events; this crate owns all
//! editor state. Bindings marshal JSON across the boundary.

use wasm_bindgen::prelude::*;

pub mod api;
pub mod capture;
pub mod editor;

pub use api::DocumentApi;
pub use capture::{pen_colors, render_typed_signature, signature_fonts, SignaturePadHandle};
pub use editor::{FieldDialog, PdfFieldEditor};

/// Errors cross the boundary as plain strings.
pub(crate) fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"fieldsign WASM initialized".into());
}
