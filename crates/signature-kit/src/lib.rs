//! Signature capture: a stroke-based drawing pad and a typed-text renderer.
//!
//! Both modes rasterize to transparent PNG data-URIs at device-pixel-ratio-
//! aware resolution and package their result as the same
//! [`shared_types::SignatureAsset`] shape, so consumers never branch on how
//! a signature was captured.

pub mod datauri;
pub mod pad;
pub mod palette;
pub mod typed;

pub use pad::{Stroke, StrokePad};
pub use palette::{PenColor, SignatureFont, PEN_COLORS, SIGNATURE_FONTS};
pub use typed::TypedSignature;

use thiserror::Error;

/// Failures of the capture and rasterization paths.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Save on a pad with no strokes.
    #[error("signature pad is empty")]
    EmptyPad,
    /// Save on a typed signature with no visible text.
    #[error("typed signature text is blank")]
    BlankText,
    #[error("font data could not be parsed")]
    InvalidFont,
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("value is not a PNG data-URI")]
    NotAPngDataUri,
    #[error("data-URI payload is not valid base64: {0}")]
    Decode(String),
}
