//! Stroke-based signature capture.
//!
//! The host feeds pointer events into a [`StrokePad`]; rasterization smooths
//! each stroke through quadratic midpoints and renders with round caps onto
//! a transparent pixmap at device-pixel-ratio resolution, matching what a
//! browser signature canvas produces.

use shared_types::{SignatureAsset, SignatureKind};
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as StrokeStyle, Transform,
};

use crate::datauri;
use crate::palette::PenColor;
use crate::CaptureError;

/// Pen stroke widths, matching the capture surface's configured range.
const MIN_PEN_WIDTH: f32 = 0.8;
const MAX_PEN_WIDTH: f32 = 3.0;

/// One continuous pen-down-to-pen-up trace. Color is fixed at stroke start
/// so changing the pen mid-signature keeps earlier ink intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: PenColor,
    pub points: Vec<(f32, f32)>,
}

/// An ink-capture surface with a fixed logical size.
#[derive(Debug, Clone)]
pub struct StrokePad {
    width: u32,
    height: u32,
    device_pixel_ratio: f32,
    pen_color: PenColor,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
}

impl StrokePad {
    /// `width`/`height` are logical (CSS) pixels; output resolution is
    /// multiplied by `device_pixel_ratio` (floored at 1).
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: device_pixel_ratio.max(1.0),
            pen_color: PenColor::default(),
            strokes: Vec::new(),
            current: None,
        }
    }

    /// Applies to strokes begun after the call.
    pub fn set_pen_color(&mut self, color: PenColor) {
        self.pen_color = color;
    }

    pub fn pen_color(&self) -> PenColor {
        self.pen_color
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        // An unfinished stroke is committed first; pointer-cancel events can
        // leave one dangling.
        if let Some(stroke) = self.current.take() {
            self.strokes.push(stroke);
        }
        self.current = Some(Stroke {
            color: self.pen_color,
            points: vec![(x, y)],
        });
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        if let Some(stroke) = self.current.as_mut() {
            stroke.points.push((x, y));
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            if !stroke.points.is_empty() {
                self.strokes.push(stroke);
            }
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.current.is_none()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Render all strokes to a transparent PNG data-URI. An empty pad is
    /// rejected rather than producing a blank image.
    pub fn to_png_data_uri(&self) -> Result<String, CaptureError> {
        if self.is_empty() {
            return Err(CaptureError::EmptyPad);
        }

        let ratio = self.device_pixel_ratio;
        let px_width = ((self.width as f32) * ratio).ceil() as u32;
        let px_height = ((self.height as f32) * ratio).ceil() as u32;
        let mut pixmap = Pixmap::new(px_width.max(1), px_height.max(1))
            .ok_or_else(|| CaptureError::Raster("zero-sized pad".into()))?;

        let transform = Transform::from_scale(ratio, ratio);
        let style = StrokeStyle {
            width: (MIN_PEN_WIDTH + MAX_PEN_WIDTH) / 2.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..StrokeStyle::default()
        };

        let pending = self.current.iter();
        for stroke in self.strokes.iter().chain(pending) {
            let mut paint = Paint::default();
            let [r, g, b, a] = stroke.color.rgba();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;

            match stroke.points.as_slice() {
                [] => {}
                [(x, y)] => {
                    // A tap leaves a dot the size of the pen tip.
                    if let Some(dot) = PathBuilder::from_circle(*x, *y, style.width) {
                        pixmap.fill_path(
                            &dot,
                            &paint,
                            tiny_skia::FillRule::Winding,
                            transform,
                            None,
                        );
                    }
                }
                points => {
                    let path = smoothed_path(points)
                        .ok_or_else(|| CaptureError::Raster("degenerate stroke".into()))?;
                    pixmap.stroke_path(&path, &paint, &style, transform, None);
                }
            }
        }

        let png = pixmap
            .encode_png()
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(datauri::encode_png(&png))
    }

    /// Package the rendered pad as the uniform asset shape shared with the
    /// typed path.
    pub fn to_asset(&self, name: &str) -> Result<SignatureAsset, CaptureError> {
        let image = self.to_png_data_uri()?;
        Ok(SignatureAsset {
            id: None,
            name: if name.trim().is_empty() {
                "Signature".into()
            } else {
                name.to_string()
            },
            image,
            kind: SignatureKind::Drawn,
            font: None,
            color: Some(self.pen_color.hex().to_string()),
            created_at: None,
        })
    }
}

/// Midpoint-smoothed path: each input point becomes the control of a
/// quadratic segment ending at the midpoint to the next, which rounds off
/// the polyline jitter of raw pointer samples.
fn smoothed_path(points: &[(f32, f32)]) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    let (x0, y0) = points[0];
    builder.move_to(x0, y0);
    for pair in points.windows(2) {
        let (cx, cy) = pair[0];
        let (nx, ny) = pair[1];
        builder.quad_to(cx, cy, (cx + nx) / 2.0, (cy + ny) / 2.0);
    }
    let (xl, yl) = points[points.len() - 1];
    builder.line_to(xl, yl);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scribble(pad: &mut StrokePad) {
        pad.begin_stroke(10.0, 40.0);
        pad.add_point(40.0, 10.0);
        pad.add_point(80.0, 60.0);
        pad.add_point(120.0, 30.0);
        pad.end_stroke();
    }

    #[test]
    fn empty_pad_is_rejected() {
        let pad = StrokePad::new(400, 200, 1.0);
        assert!(pad.is_empty());
        assert!(matches!(pad.to_png_data_uri(), Err(CaptureError::EmptyPad)));
    }

    #[test]
    fn rendered_pad_is_a_png_data_uri() {
        let mut pad = StrokePad::new(400, 200, 2.0);
        scribble(&mut pad);
        assert!(!pad.is_empty());

        let uri = pad.to_png_data_uri().unwrap();
        assert!(datauri::is_png_data_uri(&uri));

        let png = datauri::decode_png(&uri).unwrap();
        let decoded = Pixmap::decode_png(&png).unwrap();
        // Output resolution honors the 2x pixel ratio.
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 400);
        // Transparent background survives.
        assert!(decoded.pixels().iter().any(|p| p.alpha() == 0));
        // And some ink actually landed.
        assert!(decoded.pixels().iter().any(|p| p.alpha() > 0));
    }

    #[test]
    fn clear_resets_the_surface() {
        let mut pad = StrokePad::new(400, 200, 1.0);
        scribble(&mut pad);
        pad.clear();
        assert!(pad.is_empty());
        assert!(matches!(pad.to_png_data_uri(), Err(CaptureError::EmptyPad)));
    }

    #[test]
    fn pen_color_is_fixed_per_stroke() {
        let mut pad = StrokePad::new(100, 100, 1.0);
        pad.begin_stroke(5.0, 5.0);
        pad.add_point(50.0, 50.0);
        pad.end_stroke();

        pad.set_pen_color(PenColor::Red);
        pad.begin_stroke(10.0, 80.0);
        pad.add_point(90.0, 80.0);
        pad.end_stroke();

        assert_eq!(pad.stroke_count(), 2);
        let asset = pad.to_asset("").unwrap();
        assert_eq!(asset.kind, SignatureKind::Drawn);
        assert_eq!(asset.name, "Signature");
        assert_eq!(asset.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn single_tap_leaves_a_dot() {
        let mut pad = StrokePad::new(60, 60, 1.0);
        pad.begin_stroke(30.0, 30.0);
        pad.end_stroke();

        let png = datauri::decode_png(&pad.to_png_data_uri().unwrap()).unwrap();
        let decoded = Pixmap::decode_png(&png).unwrap();
        assert!(decoded.pixels().iter().any(|p| p.alpha() > 0));
    }
}
