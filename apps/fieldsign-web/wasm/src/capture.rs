//! Signature capture bindings: the stroke pad and the typed renderer.
//!
//! The JS host streams pointer events into [`SignaturePadHandle`] and
//! fetches font bytes for [`render_typed_signature`]; all rasterization
//! happens in Rust and returns the uniform asset shape as JSON.

use js_sys::Array;
use signature_kit::{PenColor, SignatureFont, StrokePad, TypedSignature, PEN_COLORS, SIGNATURE_FONTS};
use wasm_bindgen::prelude::*;

use crate::js_err;

/// The fixed pen palette as hex strings.
#[wasm_bindgen]
pub fn pen_colors() -> Array {
    PEN_COLORS
        .iter()
        .map(|c| JsValue::from_str(c.hex()))
        .collect()
}

/// The cursive font family names offered for typed signatures.
#[wasm_bindgen]
pub fn signature_fonts() -> Array {
    SIGNATURE_FONTS
        .iter()
        .map(|f| JsValue::from_str(f.name()))
        .collect()
}

/// An ink-capture surface driven by host pointer events.
#[wasm_bindgen]
pub struct SignaturePadHandle {
    pad: StrokePad,
}

#[wasm_bindgen]
impl SignaturePadHandle {
    /// `width`/`height` in CSS pixels; `device_pixel_ratio` from the host
    /// window.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            pad: StrokePad::new(width, height, device_pixel_ratio),
        }
    }

    /// Select one of the palette colors by hex value; unknown values are
    /// rejected.
    pub fn set_pen_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = PenColor::from_hex(hex)
            .ok_or_else(|| js_err(format!("{hex} is not in the pen palette")))?;
        self.pad.set_pen_color(color);
        Ok(())
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.pad.begin_stroke(x, y);
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.pad.add_point(x, y);
    }

    pub fn end_stroke(&mut self) {
        self.pad.end_stroke();
    }

    pub fn clear(&mut self) {
        self.pad.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pad.is_empty()
    }

    /// Rasterize to a transparent PNG data-URI. Errors when the pad is
    /// empty.
    pub fn to_data_uri(&self) -> Result<String, JsValue> {
        self.pad.to_png_data_uri().map_err(js_err)
    }

    /// Rasterize and package as a signature asset (JSON).
    pub fn to_asset(&self, name: &str) -> Result<String, JsValue> {
        let asset = self.pad.to_asset(name).map_err(js_err)?;
        serde_json::to_string(&asset).map_err(js_err)
    }
}

/// Rasterize a typed signature with a host-fetched font file. Returns the
/// asset shape as JSON. Blank text and unknown fonts are rejected.
#[wasm_bindgen]
pub fn render_typed_signature(
    text: &str,
    font_name: &str,
    color_hex: &str,
    font_bytes: &[u8],
    device_pixel_ratio: f32,
) -> Result<String, JsValue> {
    let font = SignatureFont::from_name(font_name)
        .ok_or_else(|| js_err(format!("{font_name} is not an offered signature font")))?;
    let color = PenColor::from_hex(color_hex)
        .ok_or_else(|| js_err(format!("{color_hex} is not in the pen palette")))?;

    let signature = TypedSignature::new(text, font, color);
    let asset = signature
        .to_asset(font_bytes, device_pixel_ratio)
        .map_err(js_err)?;
    serde_json::to_string(&asset).map_err(js_err)
}
