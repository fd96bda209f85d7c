//! `#[wasm_bindgen]` surface over the core editor session.
//!
//! Complex data crosses the boundary as JSON strings; small results come
//! back as plain JS objects built with `Reflect`.

use fieldsign_core::{
    ContainerRect, EditorPhase, EditorSession, FieldClick, FieldViewState, GalleryState,
    InteractionDialog, Placement, SignatureTab, TextInput,
};
use fieldsign_core::view;
use js_sys::{Object, Reflect};
use shared_types::{
    Contact, CreatePublicFormResponse, CurrentUser, DocumentResource, Recipient, RequiredFields,
    SignatureAsset, SubmitterInfo,
};
use wasm_bindgen::prelude::*;

use crate::js_err;

/// The editor session exposed to the JS host.
#[wasm_bindgen]
pub struct PdfFieldEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl PdfFieldEditor {
    /// The authenticated user is passed in explicitly; there is no ambient
    /// identity.
    #[wasm_bindgen(constructor)]
    pub fn new(user_name: &str, user_email: &str) -> Self {
        Self {
            session: EditorSession::new(CurrentUser::new(user_name, user_email)),
        }
    }

    // --- load ---------------------------------------------------------

    /// Apply a fetched `GET documents/{id}/` response body.
    pub fn load_document(&mut self, document_json: &str) -> Result<(), JsValue> {
        let doc: DocumentResource = serde_json::from_str(document_json).map_err(js_err)?;
        self.session.load_document(doc);
        Ok(())
    }

    /// Apply a fetched `GET documents/public-forms/{token}/` response body.
    pub fn load_public_form(&mut self, token: &str, document_json: &str) -> Result<(), JsValue> {
        let doc: DocumentResource = serde_json::from_str(document_json).map_err(js_err)?;
        self.session.load_public_form(token, doc);
        Ok(())
    }

    pub fn load_failed(&mut self, message: &str) {
        self.session.load_failed(message);
    }

    pub fn phase(&self) -> String {
        match self.session.phase() {
            EditorPhase::Loading => "loading".into(),
            EditorPhase::Ready => "ready".into(),
            EditorPhase::Failed(message) => format!("failed: {message}"),
        }
    }

    pub fn scenario(&self) -> String {
        self.session.scenario().to_string()
    }

    pub fn document_id(&self) -> Option<String> {
        self.session.document_id().map(Into::into)
    }

    pub fn public_token(&self) -> Option<String> {
        self.session.public_token().map(Into::into)
    }

    // --- paging and zoom ----------------------------------------------

    pub fn current_page(&self) -> u32 {
        self.session.current_page()
    }

    pub fn page_count(&self) -> u32 {
        self.session.page_count()
    }

    pub fn set_page_count(&mut self, count: u32) {
        self.session.set_page_count(count);
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.session.go_to_page(page);
    }

    pub fn zoom(&self) -> f64 {
        self.session.zoom().factor()
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.session.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.session.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.session.reset_zoom()
    }

    // --- placement ----------------------------------------------------

    /// Handle a palette drop. Returns `{status, key?}` where status is
    /// `placed`, `awaiting-recipient`, or `ignored`.
    pub fn place_widget(
        &mut self,
        payload: &str,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
    ) -> Result<JsValue, JsValue> {
        let rect = ContainerRect {
            left: rect_left,
            top: rect_top,
        };
        let placement = self
            .session
            .place_widget(payload, client_x, client_y, rect)
            .map_err(js_err)?;

        let result = Object::new();
        match placement {
            Placement::Placed { key } => {
                Reflect::set(&result, &"status".into(), &"placed".into())?;
                Reflect::set(&result, &"key".into(), &key.into())?;
            }
            Placement::AwaitingRecipient => {
                Reflect::set(&result, &"status".into(), &"awaiting-recipient".into())?;
            }
            Placement::Ignored => {
                Reflect::set(&result, &"status".into(), &"ignored".into())?;
            }
        }
        Ok(result.into())
    }

    pub fn assign_pending(&mut self, recipient_id: &str) -> Result<String, JsValue> {
        self.session.assign_pending(recipient_id).map_err(js_err)
    }

    pub fn cancel_pending(&mut self) {
        self.session.cancel_pending();
    }

    pub fn has_pending(&self) -> bool {
        self.session.has_pending()
    }

    // --- selection and clicks -----------------------------------------

    /// Advance the field's click cycle. Returns `selected`, `resize`,
    /// `open-dialog`, or `fill-not-permitted`.
    pub fn click_field(&mut self, key: &str) -> Result<String, JsValue> {
        let click = self.session.click_field(key).map_err(js_err)?;
        Ok(match click {
            FieldClick::Selected => "selected",
            FieldClick::ResizeEnabled => "resize",
            FieldClick::OpenDialog => "open-dialog",
            FieldClick::FillNotPermitted => "fill-not-permitted",
        }
        .into())
    }

    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    pub fn selected_field(&self) -> Option<String> {
        self.session.selected_field().map(Into::into)
    }

    // --- field mutation -----------------------------------------------

    pub fn move_field(&mut self, key: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.session.move_field(key, x, y).map_err(js_err)
    }

    pub fn move_field_by(&mut self, key: &str, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.session.move_field_by(key, dx, dy).map_err(js_err)
    }

    /// Returns whether the new box was accepted.
    pub fn resize_field(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<bool, JsValue> {
        self.session
            .resize_field(key, x, y, width, height)
            .map_err(js_err)
    }

    pub fn delete_field(&mut self, key: &str) -> Result<(), JsValue> {
        self.session.delete_field(key).map_err(js_err)
    }

    pub fn fill_field(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        self.session.fill_field(key, value).map_err(js_err)
    }

    // --- rendering data -----------------------------------------------

    /// JSON array of the fields on one page, in placement order.
    pub fn fields_for_page(&self, page: u32) -> Result<String, JsValue> {
        let fields: Vec<_> = self.session.fields_on_page(page).collect();
        serde_json::to_string(&fields).map_err(js_err)
    }

    /// Visual contract for one field: `{color, opacity, label, fontSize,
    /// state, showImage}`.
    pub fn field_style(&self, key: &str) -> Result<JsValue, JsValue> {
        let field = self
            .session
            .field(key)
            .ok_or_else(|| js_err(format!("no field with key {key}")))?;
        let owned = fieldsign_core::can_fill_field(
            self.session.scenario(),
            self.session.current_user_id(),
            field,
        );

        let style = Object::new();
        Reflect::set(&style, &"color".into(), &view::field_color(field, owned).into())?;
        Reflect::set(&style, &"opacity".into(), &view::field_opacity(owned).into())?;
        Reflect::set(&style, &"label".into(), &view::field_label(field, owned).into())?;
        Reflect::set(
            &style,
            &"fontSize".into(),
            &view::label_font_size(field, owned).into(),
        )?;
        let state = match self.session.selection_state(key) {
            FieldViewState::Idle => "idle",
            FieldViewState::Selected => "selected",
            FieldViewState::Resizing => "resizing",
        };
        Reflect::set(&style, &"state".into(), &state.into())?;
        Reflect::set(&style, &"showImage".into(), &field.has_image_response().into())?;
        Reflect::set(&style, &"imageInset".into(), &view::IMAGE_INSET.into())?;
        Ok(style.into())
    }

    // --- recipients ---------------------------------------------------

    pub fn recipients(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.recipients()).map_err(js_err)
    }

    pub fn add_recipient(&mut self, recipient_json: &str) -> Result<bool, JsValue> {
        let recipient: Recipient = serde_json::from_str(recipient_json).map_err(js_err)?;
        Ok(self.session.add_recipient(recipient))
    }

    pub fn add_contact_as_recipient(&mut self, contact_json: &str) -> Result<bool, JsValue> {
        let contact: Contact = serde_json::from_str(contact_json).map_err(js_err)?;
        Ok(self.session.add_contact_as_recipient(&contact))
    }

    pub fn remove_recipient(&mut self, id: &str) -> bool {
        self.session.remove_recipient(id)
    }

    /// Filter an address book against the roster and a search query.
    pub fn available_contacts(
        &self,
        contacts_json: &str,
        query: &str,
    ) -> Result<String, JsValue> {
        let contacts: Vec<Contact> = serde_json::from_str(contacts_json).map_err(js_err)?;
        let available = self.session.available_contacts(&contacts, query);
        serde_json::to_string(&available).map_err(js_err)
    }

    // --- persistence --------------------------------------------------

    /// Body for the best-effort `update_field_value_or_create` call.
    pub fn stage_field_value(&self, key: &str) -> Result<String, JsValue> {
        let sync = self.session.stage_field_value(key).map_err(js_err)?;
        serde_json::to_string(&sync).map_err(js_err)
    }

    /// Body for `save_fields`, under the in-flight guard.
    pub fn begin_save(&mut self) -> Result<String, JsValue> {
        let request = self.session.begin_save().map_err(js_err)?;
        serde_json::to_string(&request).map_err(js_err)
    }

    pub fn finish_save(&mut self, success: bool) {
        self.session.finish_save(success);
    }

    pub fn is_saving(&self) -> bool {
        self.session.is_saving()
    }

    // --- public form --------------------------------------------------

    pub fn build_public_form_request(
        &self,
        require_name: bool,
        require_email: bool,
        require_phone: bool,
    ) -> Result<String, JsValue> {
        let request = self
            .session
            .build_public_form_request(RequiredFields {
                name: require_name,
                email: require_email,
                phone: require_phone,
            })
            .map_err(js_err)?;
        serde_json::to_string(&request).map_err(js_err)
    }

    pub fn apply_public_form(&mut self, response_json: &str) -> Result<(), JsValue> {
        let response: CreatePublicFormResponse =
            serde_json::from_str(response_json).map_err(js_err)?;
        self.session.apply_public_form(response);
        Ok(())
    }

    pub fn set_required_fields(
        &mut self,
        require_name: bool,
        require_email: bool,
        require_phone: bool,
    ) {
        self.session.set_required_fields(RequiredFields {
            name: require_name,
            email: require_email,
            phone: require_phone,
        });
    }

    /// Validated body for `public-forms/{token}/submit/`. Errors before any
    /// body exists when a required submitter field is blank or malformed.
    pub fn begin_public_submission(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<String, JsValue> {
        let submitter = SubmitterInfo {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        };
        let submission = self
            .session
            .begin_public_submission(&submitter)
            .map_err(js_err)?;
        serde_json::to_string(&submission).map_err(js_err)
    }

    // --- dialog -------------------------------------------------------

    /// Open the interaction dialog for a field (after a third click
    /// reported `open-dialog`).
    pub fn open_dialog(&self, key: &str) -> Result<FieldDialog, JsValue> {
        let field = self
            .session
            .field(key)
            .ok_or_else(|| js_err(format!("no field with key {key}")))?;
        Ok(FieldDialog {
            dialog: InteractionDialog::for_field(field),
        })
    }
}

/// The fill/edit dialog for one field. Resolved values flow back through
/// [`PdfFieldEditor::fill_field`].
#[wasm_bindgen]
pub struct FieldDialog {
    dialog: InteractionDialog,
}

#[wasm_bindgen]
impl FieldDialog {
    pub fn field_key(&self) -> String {
        self.dialog.field_key().into()
    }

    pub fn title(&self) -> String {
        self.dialog.title()
    }

    pub fn is_signature_flow(&self) -> bool {
        self.dialog.is_signature_flow()
    }

    /// `{kind: "multiline", rows}` or `{kind: "singleline", mode}`;
    /// `null` for the signature flow.
    pub fn text_input(&self) -> Result<JsValue, JsValue> {
        let Some(input) = self.dialog.text_input() else {
            return Ok(JsValue::NULL);
        };
        let result = Object::new();
        match input {
            TextInput::MultiLine { rows } => {
                Reflect::set(&result, &"kind".into(), &"multiline".into())?;
                Reflect::set(&result, &"rows".into(), &rows.into())?;
            }
            TextInput::SingleLine { mode } => {
                Reflect::set(&result, &"kind".into(), &"singleline".into())?;
                let mode = match mode {
                    fieldsign_core::dialog::InputMode::Text => "text",
                    fieldsign_core::dialog::InputMode::Email => "email",
                    fieldsign_core::dialog::InputMode::Numeric => "numeric",
                };
                Reflect::set(&result, &"mode".into(), &mode.into())?;
            }
        }
        Ok(result.into())
    }

    pub fn set_value(&mut self, value: &str) {
        self.dialog.set_value(value);
    }

    pub fn can_save(&self) -> bool {
        self.dialog.can_save()
    }

    /// The committed text value, or `null` while saving is disabled.
    pub fn save_text(&self) -> Option<String> {
        self.dialog.clone().save_text().map(|resolved| resolved.value)
    }

    pub fn tab(&self) -> String {
        match self.dialog.tab() {
            SignatureTab::SelectExisting => "select-existing".into(),
            SignatureTab::CreateNew => "create-new".into(),
        }
    }

    pub fn select_tab(&mut self, tab: &str) {
        let tab = match tab {
            "create-new" => SignatureTab::CreateNew,
            _ => SignatureTab::SelectExisting,
        };
        self.dialog.select_tab(tab);
    }

    /// Feed the saved-signatures fetch result in; pass `null` on failure
    /// and the gallery degrades to empty.
    pub fn apply_gallery(&mut self, assets_json: Option<String>) {
        let result: Result<Vec<SignatureAsset>, String> = match assets_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| e.to_string()),
            None => Err("signature list unavailable".into()),
        };
        self.dialog.apply_gallery(result);
    }

    pub fn gallery_size(&self) -> u32 {
        match self.dialog.gallery() {
            GalleryState::Loading => 0,
            GalleryState::Loaded(assets) => assets.len() as u32,
        }
    }

    /// Pick a saved asset by index; returns its image data-URI.
    pub fn choose_existing(&self, index: u32) -> Option<String> {
        self.dialog
            .choose_existing(index as usize)
            .map(|resolved| resolved.value)
    }

    /// Finish the create-new branch with a freshly captured asset's JSON.
    pub fn accept_capture(&self, asset_json: &str) -> Result<String, JsValue> {
        let asset: SignatureAsset = serde_json::from_str(asset_json).map_err(js_err)?;
        Ok(self.dialog.clone().accept_capture(&asset).value)
    }
}
