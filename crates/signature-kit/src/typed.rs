//! Typed-signature rasterization.
//!
//! Renders a name in one of the cursive families to a transparent PNG at a
//! crispness-preserving pixel ratio. Glyph layout (kerning + horizontal
//! advance) and coverage come from `ab_glyph`; the coverage is composited
//! over the transparent background with the pen color.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use shared_types::{SignatureAsset, SignatureKind};
use tiny_skia::Pixmap;

use crate::datauri;
use crate::palette::{PenColor, SignatureFont};
use crate::CaptureError;

/// Base glyph size in logical pixels before the pixel ratio is applied.
const BASE_FONT_SIZE: f32 = 32.0;
/// Logical padding: 10 px on either side horizontally, 5 px vertically.
const H_PADDING: f32 = 10.0;
const V_PADDING: f32 = 5.0;
/// Output is rendered at no less than 2x for crispness, regardless of the
/// device's actual ratio.
const MIN_PIXEL_RATIO: f32 = 2.0;

/// A typed signature awaiting rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSignature {
    pub text: String,
    pub font: SignatureFont,
    pub color: PenColor,
}

impl TypedSignature {
    pub fn new(text: impl Into<String>, font: SignatureFont, color: PenColor) -> Self {
        Self {
            text: text.into(),
            font,
            color,
        }
    }

    /// Rasterize to a PNG data-URI. The font file bytes are supplied by the
    /// caller; this crate ships no font binaries.
    pub fn render(
        &self,
        font_data: &[u8],
        device_pixel_ratio: f32,
    ) -> Result<String, CaptureError> {
        if self.text.trim().is_empty() {
            return Err(CaptureError::BlankText);
        }
        let font = FontRef::try_from_slice(font_data).map_err(|_| CaptureError::InvalidFont)?;

        let ratio = device_pixel_ratio.max(MIN_PIXEL_RATIO);
        let size = BASE_FONT_SIZE * ratio;
        let scaled = font.as_scaled(PxScale::from(size));

        let text_width = line_advance(&scaled, &self.text);
        let width = (text_width + 2.0 * H_PADDING * ratio).ceil() as u32;
        let height = (size + 2.0 * V_PADDING * ratio).ceil() as u32;

        let mut coverage = RgbaBuffer::new(width.max(1), height.max(1));
        let origin_x = H_PADDING * ratio;
        let baseline_y = V_PADDING * ratio + scaled.ascent();
        draw_line(
            &mut coverage,
            &font,
            size,
            &self.text,
            origin_x,
            baseline_y,
            self.color.rgba(),
        );

        let pixmap = coverage.into_pixmap()?;
        let png = pixmap
            .encode_png()
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(datauri::encode_png(&png))
    }

    /// Render and package as the uniform asset shape shared with the drawn
    /// path.
    pub fn to_asset(
        &self,
        font_data: &[u8],
        device_pixel_ratio: f32,
    ) -> Result<SignatureAsset, CaptureError> {
        let image = self.render(font_data, device_pixel_ratio)?;
        Ok(SignatureAsset {
            id: None,
            name: self.text.clone(),
            image,
            kind: SignatureKind::Typed,
            font: Some(self.font.css_value().to_string()),
            color: Some(self.color.hex().to_string()),
            created_at: None,
        })
    }
}

/// Total advance of one line, kerning included.
fn line_advance<F: Font, SF: ScaleFont<F>>(scaled: &SF, text: &str) -> f32 {
    let mut advance = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            advance += scaled.kern(prev, id);
        }
        advance += scaled.h_advance(id);
        prev = Some(id);
    }
    advance
}

/// Straight-alpha RGBA scratch buffer. Glyph coverage composites here first;
/// tiny-skia wants premultiplied pixels, so conversion happens once at the
/// end instead of per fragment.
struct RgbaBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaBuffer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: [u8; 4], coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let src_a = (coverage * color[3] as f32).clamp(0.0, 255.0) as u8;
        if src_a == 0 {
            return;
        }
        let dst_a = self.pixels[idx + 3];
        if dst_a == 0 {
            self.pixels[idx] = color[0];
            self.pixels[idx + 1] = color[1];
            self.pixels[idx + 2] = color[2];
            self.pixels[idx + 3] = src_a;
            return;
        }
        // Alpha-over: overlapping glyph edges (script fonts connect) must not
        // punch holes in each other.
        let sa = src_a as f32 / 255.0;
        let da = dst_a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            self.pixels[idx + c] = ((color[c] as f32 * sa
                + self.pixels[idx + c] as f32 * da * (1.0 - sa))
                / out_a)
                .round() as u8;
        }
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    fn into_pixmap(self) -> Result<Pixmap, CaptureError> {
        let mut pixmap = Pixmap::new(self.width, self.height)
            .ok_or_else(|| CaptureError::Raster("zero-sized canvas".into()))?;
        let data = pixmap.data_mut();
        for (dst, src) in data.chunks_exact_mut(4).zip(self.pixels.chunks_exact(4)) {
            let a = src[3] as u16;
            dst[0] = ((src[0] as u16 * a) / 255) as u8;
            dst[1] = ((src[1] as u16 * a) / 255) as u8;
            dst[2] = ((src[2] as u16 * a) / 255) as u8;
            dst[3] = src[3];
        }
        Ok(pixmap)
    }
}

fn draw_line(
    buffer: &mut RgbaBuffer,
    font: &FontRef<'_>,
    size: f32,
    text: &str,
    origin_x: f32,
    baseline_y: f32,
    color: [u8; 4],
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut cursor_x = origin_x;
    let mut prev = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }
        prev = Some(id);

        let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, cov| {
                buffer.blend(
                    bounds.min.x as i32 + gx as i32,
                    bounds.min.y as i32 + gy as i32,
                    color,
                    cov,
                );
            });
        }
        cursor_x += scaled.h_advance(id);
    }
}
