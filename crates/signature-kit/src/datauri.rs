//! PNG data-URI encoding, the interchange format for signature images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::CaptureError;

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Wrap raw PNG bytes in a `data:image/png;base64,` URI.
pub fn encode_png(bytes: &[u8]) -> String {
    format!("{PNG_PREFIX}{}", STANDARD.encode(bytes))
}

/// Recover the PNG bytes from a data URI produced by [`encode_png`] (or by a
/// browser canvas `toDataURL("image/png")`).
pub fn decode_png(uri: &str) -> Result<Vec<u8>, CaptureError> {
    let payload = uri
        .strip_prefix(PNG_PREFIX)
        .ok_or(CaptureError::NotAPngDataUri)?;
    STANDARD
        .decode(payload)
        .map_err(|e| CaptureError::Decode(e.to_string()))
}

pub fn is_png_data_uri(value: &str) -> bool {
    value.starts_with(PNG_PREFIX)
}
