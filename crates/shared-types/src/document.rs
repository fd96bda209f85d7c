//! Document resources and the request/response bodies of the document API.
//!
//! Shapes here mirror the server contract: `GET documents/{id}/`,
//! `POST documents/{id}/save_fields/`, the best-effort
//! `update_field_value_or_create/` sync, the public-form lifecycle, and the
//! reusable signature-asset store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::Placeholder;
use crate::recipient::Recipient;
use crate::scenario::Scenario;

/// Which submitter contact fields are mandatory on the public form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequiredFields {
    #[serde(default)]
    pub name: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub phone: bool,
}

/// Public-form configuration attached to a template document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PublicFormConfig {
    #[serde(default)]
    pub required_fields: RequiredFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_token: Option<String>,
}

/// Document metadata as served by `GET documents/{id}/` and
/// `GET documents/public-forms/{token}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub scenario: Scenario,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    /// Persisted field layout, grouped by page.
    #[serde(default)]
    pub fields: Vec<Placeholder>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_form_config: Option<PublicFormConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST documents/{id}/save_fields/`, the authoritative bulk save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFieldsRequest {
    pub placeholders: Vec<Placeholder>,
    pub recipients: Vec<Recipient>,
}

/// Body of `POST documents/{id}/update_field_value_or_create/`, the
/// fire-and-forget per-field value sync. Failure is non-fatal; the bulk save
/// is the authoritative fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueSync {
    pub field_id: String,
    pub value: String,
}

/// Body of `POST documents/{id}/create_public_form/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePublicFormRequest {
    pub public_form_config: PublicFormConfig,
}

/// Response of `POST documents/{id}/create_public_form/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePublicFormResponse {
    pub public_url: String,
    pub public_token: String,
}

/// Contact info an anonymous submitter enters on the public form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubmitterInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Body of `POST documents/public-forms/{token}/submit/`. Field values
/// filled by the submitter travel inside the grouped field payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub fields: Vec<Placeholder>,
}

/// A prior submission as listed by the submissions screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: Vec<Placeholder>,
}

/// Provenance of a reusable signature asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Typed,
    Drawn,
}

/// A persisted, reusable signature: the uniform output shape of both capture
/// modes, stored via `GET/POST signatures/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// `data:image/png;base64,...` with transparent background.
    pub image: String,
    #[serde(rename = "type")]
    pub kind: SignatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldKind, FieldOptions};
    use crate::layout::group_by_page;

    #[test]
    fn document_resource_defaults_are_lenient() {
        // A bare template response still parses.
        let doc: DocumentResource = serde_json::from_str(r#"{"scenario":"template"}"#).unwrap();
        assert_eq!(doc.scenario, Scenario::Template);
        assert!(doc.recipients.is_empty());
        assert!(doc.fields.is_empty());
        assert!(doc.public_form_config.is_none());
    }

    #[test]
    fn save_request_uses_placeholders_key() {
        let field = Field {
            key: "f-1".into(),
            kind: FieldKind::Text,
            x_position: 10.0,
            y_position: 20.0,
            width: 200.0,
            height: 50.0,
            page_number: 1,
            recipient_id: None,
            response: None,
            options: FieldOptions::default(),
        };
        let request = SaveFieldsRequest {
            placeholders: group_by_page(vec![field]),
            recipients: Vec::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("placeholders").is_some());
        assert_eq!(json["placeholders"][0]["pageNumber"], 1);
        assert!(json["placeholders"][0]["pos"][0].get("pageNumber").is_none());
    }

    #[test]
    fn required_fields_default_to_optional() {
        let config: PublicFormConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!config.required_fields.name);
        assert!(!config.required_fields.email);
        assert!(!config.required_fields.phone);

        let config: PublicFormConfig =
            serde_json::from_str(r#"{"required_fields":{"email":true}}"#).unwrap();
        assert!(config.required_fields.email);
        assert!(!config.required_fields.phone);
    }

    #[test]
    fn submission_record_parses_listing_entry() {
        let record: SubmissionRecord = serde_json::from_str(
            r#"{
                "id": "sub-1",
                "name": "Sam",
                "email": "sam@example.com",
                "submitted_at": "2026-07-01T12:30:00Z",
                "fields": [{"pageNumber": 1, "pos": []}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.id, "sub-1");
        assert_eq!(record.phone, "");
        assert_eq!(record.fields[0].page_number, 1);
    }

    #[test]
    fn signature_asset_wire_shape() {
        let asset = SignatureAsset {
            id: None,
            name: "Jane Doe".into(),
            image: "data:image/png;base64,iVBOR".into(),
            kind: SignatureKind::Typed,
            font: Some("Dancing Script".into()),
            color: Some("#000000".into()),
            created_at: None,
        };
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "typed");
        assert_eq!(json["font"], "Dancing Script");
        assert!(json.get("id").is_none());
    }
}
