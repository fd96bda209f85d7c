//! Fetch-based client for the document API.
//!
//! Request bodies are produced by the editor session; this module only
//! moves them. The per-field value sync is fire-and-forget by contract:
//! its failures are logged to the console and swallowed, because the bulk
//! `save_fields` call is the authoritative fallback.

use js_sys::{Array, Uint8Array};
use shared_types::SignatureAsset;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use crate::js_err;

/// HTTP client bound to an API base URL.
#[wasm_bindgen]
pub struct DocumentApi {
    base: String,
}

#[wasm_bindgen]
impl DocumentApi {
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body_json: Option<&str>,
    ) -> Result<Response, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body_json {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&self.url(path), &opts)?;
        if body_json.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or("No window")?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "{} {} failed: {}",
                method,
                path,
                response.status()
            )));
        }
        Ok(response)
    }

    async fn request_json(
        &self,
        method: &str,
        path: &str,
        body_json: Option<&str>,
    ) -> Result<JsValue, JsValue> {
        let response = self.request(method, path, body_json).await?;
        JsFuture::from(response.json()?).await
    }

    // --- documents ----------------------------------------------------

    /// `GET documents/{id}/`
    pub async fn fetch_document(&self, document_id: &str) -> Result<JsValue, JsValue> {
        self.request_json("GET", &format!("documents/{document_id}/"), None)
            .await
    }

    /// `POST documents/{id}/save_fields/` with the body from
    /// `PdfFieldEditor::begin_save`.
    pub async fn save_fields(
        &self,
        document_id: &str,
        body_json: &str,
    ) -> Result<JsValue, JsValue> {
        self.request_json(
            "POST",
            &format!("documents/{document_id}/save_fields/"),
            Some(body_json),
        )
        .await
    }

    /// `POST documents/{id}/update_field_value_or_create/`, best-effort.
    /// Always resolves; a failure is logged and deferred to the next bulk
    /// save.
    pub async fn sync_field_value(&self, document_id: &str, body_json: &str) {
        let result = self
            .request(
                "POST",
                &format!("documents/{document_id}/update_field_value_or_create/"),
                Some(body_json),
            )
            .await;
        if let Err(err) = result {
            web_sys::console::warn_2(
                &"field value sync failed (deferred to bulk save):".into(),
                &err,
            );
        }
    }

    // --- public forms -------------------------------------------------

    /// `POST documents/{id}/create_public_form/`
    pub async fn create_public_form(
        &self,
        document_id: &str,
        body_json: &str,
    ) -> Result<JsValue, JsValue> {
        self.request_json(
            "POST",
            &format!("documents/{document_id}/create_public_form/"),
            Some(body_json),
        )
        .await
    }

    /// `GET documents/public-forms/{token}/`
    pub async fn fetch_public_form(&self, token: &str) -> Result<JsValue, JsValue> {
        self.request_json("GET", &format!("documents/public-forms/{token}/"), None)
            .await
    }

    /// `POST documents/public-forms/{token}/submit/` with the body from
    /// `PdfFieldEditor::begin_public_submission`.
    pub async fn submit_public_form(
        &self,
        token: &str,
        body_json: &str,
    ) -> Result<JsValue, JsValue> {
        self.request_json(
            "POST",
            &format!("documents/public-forms/{token}/submit/"),
            Some(body_json),
        )
        .await
    }

    /// `GET documents/{id}/submissions/`
    pub async fn list_submissions(&self, document_id: &str) -> Result<JsValue, JsValue> {
        self.request_json("GET", &format!("documents/{document_id}/submissions/"), None)
            .await
    }

    // --- signature assets ---------------------------------------------

    /// `GET signatures/`
    pub async fn list_signatures(&self) -> Result<JsValue, JsValue> {
        self.request_json("GET", "signatures/", None).await
    }

    /// `POST signatures/` as multipart: the PNG blob plus the asset
    /// metadata fields.
    pub async fn create_signature(&self, asset_json: &str) -> Result<JsValue, JsValue> {
        let asset: SignatureAsset = serde_json::from_str(asset_json).map_err(js_err)?;
        let png = signature_kit::datauri::decode_png(&asset.image).map_err(js_err)?;

        let bytes = Uint8Array::from(png.as_slice());
        let parts = Array::new();
        parts.push(&bytes);
        let bag = BlobPropertyBag::new();
        bag.set_type("image/png");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename("image", &blob, "signature.png")?;
        form.append_with_str("name", &asset.name)?;
        form.append_with_str(
            "type",
            match asset.kind {
                shared_types::SignatureKind::Typed => "typed",
                shared_types::SignatureKind::Drawn => "drawn",
            },
        )?;
        if let Some(font) = &asset.font {
            form.append_with_str("font", font)?;
        }
        if let Some(color) = &asset.color {
            form.append_with_str("color", color)?;
        }

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&form);
        // No Content-Type header: the browser supplies the multipart
        // boundary.
        let request = Request::new_with_str_and_init(&self.url("signatures/"), &opts)?;

        let window = web_sys::window().ok_or("No window")?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "POST signatures/ failed: {}",
                response.status()
            )));
        }
        JsFuture::from(response.json()?).await
    }

    // --- contacts -----------------------------------------------------

    /// `GET contacts/`
    pub async fn list_contacts(&self) -> Result<JsValue, JsValue> {
        self.request_json("GET", "contacts/", None).await
    }

    /// `POST contacts/`
    pub async fn create_contact(&self, contact_json: &str) -> Result<JsValue, JsValue> {
        self.request_json("POST", "contacts/", Some(contact_json)).await
    }

    /// `PUT contacts/{id}/`
    pub async fn update_contact(
        &self,
        contact_id: &str,
        contact_json: &str,
    ) -> Result<JsValue, JsValue> {
        self.request_json("PUT", &format!("contacts/{contact_id}/"), Some(contact_json))
            .await
    }

    /// `DELETE contacts/{id}/`
    pub async fn delete_contact(&self, contact_id: &str) -> Result<(), JsValue> {
        self.request("DELETE", &format!("contacts/{contact_id}/"), None)
            .await?;
        Ok(())
    }
}
