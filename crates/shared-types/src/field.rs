//! Field records: placeable, fillable regions on a PDF page.
//!
//! The wire contract uses the casing the document API grew up with
//! (`xPosition`, `Width`, `recipientId`), so every struct here carries
//! explicit serde renames rather than a blanket `rename_all`.

use serde::{Deserialize, Serialize};

/// Closed set of placeable field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Signature,
    Initials,
    Stamp,
    Text,
    Name,
    Email,
    Number,
    Date,
    Checkbox,
    Radio,
}

impl FieldKind {
    /// Field types whose value is captured through the signature pad.
    pub fn is_signature_like(self) -> bool {
        matches!(self, FieldKind::Signature | FieldKind::Initials)
    }

    /// Field types whose response is rendered as an image rather than text.
    pub fn is_image_backed(self) -> bool {
        matches!(
            self,
            FieldKind::Signature | FieldKind::Initials | FieldKind::Stamp
        )
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Signature => write!(f, "signature"),
            FieldKind::Initials => write!(f, "initials"),
            FieldKind::Stamp => write!(f, "stamp"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Name => write!(f, "name"),
            FieldKind::Email => write!(f, "email"),
            FieldKind::Number => write!(f, "number"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Checkbox => write!(f, "checkbox"),
            FieldKind::Radio => write!(f, "radio"),
        }
    }
}

/// Whether a field must be filled before a document is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    #[default]
    Required,
    Optional,
}

/// Free-form field metadata carried through the save/load round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldOptions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: FieldStatus,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
}

impl FieldOptions {
    /// Generated options for a freshly placed widget.
    pub fn generated(kind: FieldKind, key: &str) -> Self {
        Self {
            name: format!("{}-{}", kind, key),
            status: FieldStatus::Required,
            default_value: String::new(),
        }
    }
}

/// A placed field tagged with the page it lives on.
///
/// `page_number` is 1-based and immutable once the field is placed; fields
/// never move between pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "xPosition")]
    pub x_position: f64,
    #[serde(rename = "yPosition")]
    pub y_position: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    #[serde(rename = "recipientId", default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub options: FieldOptions,
}

impl Field {
    /// A field with a non-empty response is rendered as filled.
    pub fn is_filled(&self) -> bool {
        self.response.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// True when the response is an image data-URI (drawn/typed signature,
    /// stamp) rather than plain text.
    pub fn has_image_response(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.starts_with("data:image"))
    }

    /// Strip the page tag for placement inside a page bucket.
    pub fn into_placed(self) -> (u32, PlacedField) {
        (
            self.page_number,
            PlacedField {
                key: self.key,
                kind: self.kind,
                x_position: self.x_position,
                y_position: self.y_position,
                width: self.width,
                height: self.height,
                recipient_id: self.recipient_id,
                response: self.response,
                options: self.options,
            },
        )
    }
}

/// A field as it appears inside a page bucket on the wire: identical to
/// [`Field`] except that the page number is implied by the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedField {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "xPosition")]
    pub x_position: f64,
    #[serde(rename = "yPosition")]
    pub y_position: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "recipientId", default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub options: FieldOptions,
}

impl PlacedField {
    /// Reattach the page tag when flattening a bucket back into the editor's
    /// in-memory list.
    pub fn into_field(self, page_number: u32) -> Field {
        Field {
            key: self.key,
            kind: self.kind,
            x_position: self.x_position,
            y_position: self.y_position,
            width: self.width,
            height: self.height,
            page_number,
            recipient_id: self.recipient_id,
            response: self.response,
            options: self.options,
        }
    }
}
