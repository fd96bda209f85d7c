//! The editor orchestrator: owns the field list, selection, roster, zoom,
//! paging, and the load/save lifecycle against the document API.
//!
//! The session is sans-I/O. Loading applies an already-fetched
//! [`DocumentResource`]; saving hands back the request body to send and is
//! told the outcome via [`EditorSession::finish_save`]. Persistence is
//! two-tier: [`EditorSession::stage_field_value`] builds the fire-and-forget
//! per-field sync body (failures are the transport's to swallow), while
//! [`EditorSession::begin_save`] produces the authoritative bulk payload
//! under an in-flight guard.

use shared_types::{
    flatten_placeholders, group_by_page, Contact, CreatePublicFormRequest,
    CreatePublicFormResponse, CurrentUser, DocumentResource, Field, FieldOptions, FieldValueSync,
    PublicFormConfig, PublicSubmission, Recipient, RequiredFields, SaveFieldsRequest, Scenario,
    SubmitterInfo,
};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog;
use crate::coords::{viewport_to_document, ContainerRect, Zoom};
use crate::policy;
use crate::roster::Roster;
use crate::view::{self, ClickAction, FieldViewState};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("document is still loading")]
    NotReady,
    #[error("document failed to load: {0}")]
    LoadFailed(String),
    #[error("a save is already in flight")]
    SaveInFlight,
    #[error("no field with key {0}")]
    UnknownField(String),
    #[error("no recipient with id {0}")]
    UnknownRecipient(String),
    #[error("no field is awaiting recipient assignment")]
    NoPendingField,
    #[error("field {0} is assigned to another recipient")]
    FillNotAllowed(String),
    #[error("there are no fields to save")]
    NothingToSave,
    #[error("document has no server id")]
    MissingDocumentId,
    #[error("document has no public token")]
    MissingPublicToken,
    #[error("submitter {0} is required")]
    MissingSubmitterField(&'static str),
    #[error("submitter {0} is not valid")]
    InvalidSubmitterField(&'static str),
}

/// Lifecycle of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Ready,
    /// Load failed; the view degrades to an empty state with this message.
    Failed(String),
}

/// Result of dropping a widget onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Field created and auto-assigned; selected.
    Placed { key: String },
    /// Request scenario: the recipient selector must resolve the
    /// assignment before the field joins the list.
    AwaitingRecipient,
    /// Drop payload matched no widget type; nothing happened.
    Ignored,
}

/// Outcome of a click on a field, after the per-field state machine and
/// the fill policy have both had their say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClick {
    Selected,
    ResizeEnabled,
    /// Third click: open the interaction dialog for this field.
    OpenDialog,
    /// Third click on a field the current user may not fill; the cycle
    /// resets without opening anything.
    FillNotPermitted,
}

/// A dropped field waiting in the recipient selector.
#[derive(Debug, Clone)]
struct PendingField {
    field: Field,
}

/// One document-editing session.
#[derive(Debug)]
pub struct EditorSession {
    phase: EditorPhase,
    scenario: Scenario,
    document_id: Option<String>,
    public_token: Option<String>,
    roster: Roster,
    fields: Vec<Field>,
    pending: Option<PendingField>,
    selection: Option<(String, FieldViewState)>,
    current_page: u32,
    page_count: u32,
    zoom: Zoom,
    save_in_flight: bool,
    public_form_config: Option<PublicFormConfig>,
}

impl EditorSession {
    pub fn new(current_user: CurrentUser) -> Self {
        Self {
            phase: EditorPhase::Loading,
            scenario: Scenario::default(),
            document_id: None,
            public_token: None,
            roster: Roster::new(current_user),
            fields: Vec::new(),
            pending: None,
            selection: None,
            current_page: 1,
            page_count: 0,
            zoom: Zoom::default(),
            save_in_flight: false,
            public_form_config: None,
        }
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Apply a fetched `GET documents/{id}/` response.
    pub fn load_document(&mut self, doc: DocumentResource) {
        self.scenario = doc.scenario;
        self.document_id = doc.id;
        self.roster = Roster::from_external(self.roster.current_user().clone(), doc.recipients);
        self.fields = flatten_placeholders(doc.fields);
        self.page_count = doc.page_count;
        self.public_form_config = doc.public_form_config;
        self.current_page = 1;
        self.selection = None;
        self.pending = None;
        self.phase = EditorPhase::Ready;
        tracing::info!(
            scenario = %self.scenario,
            fields = self.fields.len(),
            recipients = self.roster.recipients().len(),
            "document loaded"
        );
    }

    /// Apply a fetched `GET documents/public-forms/{token}/` response for
    /// anonymous template filling.
    pub fn load_public_form(&mut self, token: &str, doc: DocumentResource) {
        self.load_document(doc);
        self.scenario = Scenario::Template;
        self.public_token = Some(token.to_string());
    }

    /// Record a load failure; the view shows the message over an empty,
    /// still-interactive state.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "document load failed");
        self.phase = EditorPhase::Failed(message);
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    fn ensure_ready(&self) -> Result<(), EditorError> {
        match &self.phase {
            EditorPhase::Ready => Ok(()),
            EditorPhase::Loading => Err(EditorError::NotReady),
            EditorPhase::Failed(message) => Err(EditorError::LoadFailed(message.clone())),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Fields rendered on the given page, in placement order.
    pub fn fields_on_page(&self, page: u32) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.page_number == page)
    }

    pub fn recipients(&self) -> &[Recipient] {
        self.roster.recipients()
    }

    pub fn current_user_id(&self) -> &str {
        self.roster.current_user_id()
    }

    pub fn public_form_config(&self) -> Option<&PublicFormConfig> {
        self.public_form_config.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    // ------------------------------------------------------------------
    // Paging and zoom
    // ------------------------------------------------------------------

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// The rendering host reports the real page count once the PDF opens.
    pub fn set_page_count(&mut self, count: u32) {
        self.page_count = count;
        self.current_page = self.current_page.min(count.max(1));
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.page_count.max(1));
        self.selection = None;
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom = self.zoom.zoom_in();
        self.zoom.factor()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = self.zoom.zoom_out();
        self.zoom.factor()
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.zoom = self.zoom.reset();
        self.zoom.factor()
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Handle a palette drop on the canvas. Coordinates are viewport pixels
    /// of the drop event; the container rectangle and current zoom map them
    /// into document space.
    pub fn place_widget(
        &mut self,
        payload: &str,
        client_x: f64,
        client_y: f64,
        rect: ContainerRect,
    ) -> Result<Placement, EditorError> {
        self.ensure_ready()?;
        let Some(widget) = catalog::widget_for_payload(payload) else {
            return Ok(Placement::Ignored);
        };

        let (x, y) = viewport_to_document(client_x, client_y, rect, self.zoom);
        let key = Uuid::new_v4().to_string();
        let field = Field {
            key: key.clone(),
            kind: widget.kind,
            x_position: x,
            y_position: y,
            width: widget.default_width,
            height: widget.default_height,
            page_number: self.current_page,
            recipient_id: policy::auto_assignment(self.scenario, self.roster.current_user_id()),
            response: None,
            options: FieldOptions::generated(widget.kind, &key),
        };

        if field.recipient_id.is_some() {
            self.fields.push(field);
            self.selection = Some((key.clone(), FieldViewState::Selected));
            Ok(Placement::Placed { key })
        } else {
            self.pending = Some(PendingField { field });
            Ok(Placement::AwaitingRecipient)
        }
    }

    /// Resolve the recipient selector: assign the pending field and append
    /// it to the list.
    pub fn assign_pending(&mut self, recipient_id: &str) -> Result<String, EditorError> {
        if self.roster.by_id(recipient_id).is_none() {
            return Err(EditorError::UnknownRecipient(recipient_id.to_string()));
        }
        let pending = self.pending.take().ok_or(EditorError::NoPendingField)?;
        let mut field = pending.field;
        field.recipient_id = Some(recipient_id.to_string());
        let key = field.key.clone();
        self.fields.push(field);
        self.selection = Some((key.clone(), FieldViewState::Selected));
        Ok(key)
    }

    /// Cancel the recipient selector; the pending field is discarded.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    // ------------------------------------------------------------------
    // Selection and the click cycle
    // ------------------------------------------------------------------

    pub fn selected_field(&self) -> Option<&str> {
        self.selection.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn selection_state(&self, key: &str) -> FieldViewState {
        match &self.selection {
            Some((selected, state)) if selected == key => *state,
            _ => FieldViewState::Idle,
        }
    }

    /// A click on a field advances its view cycle. Clicking a different
    /// field restarts the cycle there; the third click opens the dialog
    /// only when the fill policy allows it.
    pub fn click_field(&mut self, key: &str) -> Result<FieldClick, EditorError> {
        self.ensure_ready()?;
        if self.field(key).is_none() {
            return Err(EditorError::UnknownField(key.to_string()));
        }

        let state = self.selection_state(key);
        let (next, action) = state.click();
        self.selection = match next {
            FieldViewState::Idle => None,
            state => Some((key.to_string(), state)),
        };

        Ok(match action {
            ClickAction::Select => FieldClick::Selected,
            ClickAction::EnableResize => FieldClick::ResizeEnabled,
            ClickAction::OpenDialog => match self.field(key) {
                Some(field)
                    if policy::can_fill_field(
                        self.scenario,
                        self.roster.current_user_id(),
                        field,
                    ) =>
                {
                    FieldClick::OpenDialog
                }
                _ => FieldClick::FillNotPermitted,
            },
        })
    }

    /// Click on empty canvas: clear any selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    // ------------------------------------------------------------------
    // Field mutation
    // ------------------------------------------------------------------

    fn field_mut(&mut self, key: &str) -> Result<&mut Field, EditorError> {
        self.fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| EditorError::UnknownField(key.to_string()))
    }

    /// Drag-end position update; applies in any selection state.
    pub fn move_field(&mut self, key: &str, x: f64, y: f64) -> Result<(), EditorError> {
        self.ensure_ready()?;
        view::apply_move(self.field_mut(key)?, x, y);
        Ok(())
    }

    /// Drag an existing field by a document-space delta. Its page never
    /// changes.
    pub fn move_field_by(&mut self, key: &str, dx: f64, dy: f64) -> Result<(), EditorError> {
        self.ensure_ready()?;
        view::apply_move_by(self.field_mut(key)?, dx, dy);
        Ok(())
    }

    /// Transform-end size update. Returns whether the new box was accepted
    /// (a box under the minimum on either axis is rejected whole).
    pub fn resize_field(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<bool, EditorError> {
        self.ensure_ready()?;
        Ok(view::apply_resize(self.field_mut(key)?, x, y, width, height))
    }

    /// Delete-glyph click: removes the field and clears selection
    /// unconditionally.
    pub fn delete_field(&mut self, key: &str) -> Result<(), EditorError> {
        self.ensure_ready()?;
        let before = self.fields.len();
        self.fields.retain(|f| f.key != key);
        if self.fields.len() == before {
            return Err(EditorError::UnknownField(key.to_string()));
        }
        self.selection = None;
        Ok(())
    }

    /// Store a resolved dialog value as the field's response, gated by the
    /// fill policy.
    pub fn fill_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_ready()?;
        let scenario = self.scenario;
        let current_user = self.roster.current_user_id().to_string();
        let field = self.field_mut(key)?;
        if !policy::can_fill_field(scenario, &current_user, field) {
            return Err(EditorError::FillNotAllowed(key.to_string()));
        }
        field.response = Some(value.into());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Build the best-effort `update_field_value_or_create` body for a
    /// filled field. Fire-and-forget: the transport logs failures and moves
    /// on; the bulk save remains authoritative.
    pub fn stage_field_value(&self, key: &str) -> Result<FieldValueSync, EditorError> {
        let field = self
            .field(key)
            .ok_or_else(|| EditorError::UnknownField(key.to_string()))?;
        Ok(FieldValueSync {
            field_id: field.key.clone(),
            value: field.response.clone().unwrap_or_default(),
        })
    }

    /// Start the authoritative bulk save: regroup by page and hand back the
    /// `save_fields` body. Refuses while a save is outstanding; call
    /// [`Self::finish_save`] with the outcome to release the guard.
    pub fn begin_save(&mut self) -> Result<SaveFieldsRequest, EditorError> {
        self.ensure_ready()?;
        if self.save_in_flight {
            return Err(EditorError::SaveInFlight);
        }
        if self.document_id.is_none() {
            return Err(EditorError::MissingDocumentId);
        }
        if self.fields.is_empty() {
            return Err(EditorError::NothingToSave);
        }
        self.save_in_flight = true;
        Ok(SaveFieldsRequest {
            placeholders: group_by_page(self.fields.clone()),
            recipients: self.roster.recipients().to_vec(),
        })
    }

    /// Report the save outcome. State is preserved on failure so the user
    /// can retry; no automatic retry happens here.
    pub fn finish_save(&mut self, success: bool) {
        self.save_in_flight = false;
        if success {
            tracing::info!(fields = self.fields.len(), "field layout saved");
        } else {
            tracing::warn!("field layout save failed; awaiting manual retry");
        }
    }

    // ------------------------------------------------------------------
    // Public form
    // ------------------------------------------------------------------

    /// Body for `POST documents/{id}/create_public_form/`.
    pub fn build_public_form_request(
        &self,
        required_fields: RequiredFields,
    ) -> Result<CreatePublicFormRequest, EditorError> {
        self.ensure_ready()?;
        if self.document_id.is_none() {
            return Err(EditorError::MissingDocumentId);
        }
        Ok(CreatePublicFormRequest {
            public_form_config: PublicFormConfig {
                required_fields,
                public_url: None,
                public_token: None,
            },
        })
    }

    /// Adopt the server's public-link response.
    pub fn apply_public_form(&mut self, response: CreatePublicFormResponse) {
        let required_fields = self
            .public_form_config
            .as_ref()
            .map(|c| c.required_fields)
            .unwrap_or_default();
        self.public_form_config = Some(PublicFormConfig {
            required_fields,
            public_url: Some(response.public_url),
            public_token: Some(response.public_token),
        });
    }

    pub fn set_required_fields(&mut self, required_fields: RequiredFields) {
        match self.public_form_config.as_mut() {
            Some(config) => config.required_fields = required_fields,
            None => {
                self.public_form_config = Some(PublicFormConfig {
                    required_fields,
                    public_url: None,
                    public_token: None,
                })
            }
        }
    }

    /// Start an anonymous template submission. Required submitter fields
    /// are validated here, before any request body exists; the native
    /// form's `required` attributes are not relied on. The same in-flight
    /// guard as the bulk save applies.
    pub fn begin_public_submission(
        &mut self,
        submitter: &SubmitterInfo,
    ) -> Result<PublicSubmission, EditorError> {
        self.ensure_ready()?;
        if self.public_token.is_none() {
            return Err(EditorError::MissingPublicToken);
        }
        if self.save_in_flight {
            return Err(EditorError::SaveInFlight);
        }

        let required = self
            .public_form_config
            .as_ref()
            .map(|c| c.required_fields)
            .unwrap_or_default();
        validate_submitter(submitter, required)?;

        self.save_in_flight = true;
        Ok(PublicSubmission {
            name: submitter.name.trim().to_string(),
            email: submitter.email.trim().to_string(),
            phone: submitter.phone.trim().to_string(),
            fields: group_by_page(self.fields.clone()),
        })
    }

    pub fn public_token(&self) -> Option<&str> {
        self.public_token.as_deref()
    }

    // ------------------------------------------------------------------
    // Recipients
    // ------------------------------------------------------------------

    pub fn add_recipient(&mut self, recipient: Recipient) -> bool {
        self.roster.add(recipient)
    }

    pub fn add_contact_as_recipient(&mut self, contact: &Contact) -> bool {
        self.roster.add_contact(contact)
    }

    pub fn remove_recipient(&mut self, id: &str) -> bool {
        self.roster.remove(id)
    }

    pub fn available_contacts<'c>(
        &self,
        contacts: &'c [Contact],
        query: &str,
    ) -> Vec<&'c Contact> {
        self.roster.available_contacts(contacts, query)
    }
}

/// Pre-submit validation of the public form's submitter info.
fn validate_submitter(
    submitter: &SubmitterInfo,
    required: RequiredFields,
) -> Result<(), EditorError> {
    let name = submitter.name.trim();
    let email = submitter.email.trim();
    let phone = submitter.phone.trim();

    if required.name && name.is_empty() {
        return Err(EditorError::MissingSubmitterField("name"));
    }
    if required.email && email.is_empty() {
        return Err(EditorError::MissingSubmitterField("email"));
    }
    if required.phone && phone.is_empty() {
        return Err(EditorError::MissingSubmitterField("phone"));
    }
    if !email.is_empty() && !is_plausible_email(email) {
        return Err(EditorError::InvalidSubmitterField("email"));
    }
    if !phone.is_empty() && !is_plausible_phone(phone) {
        return Err(EditorError::InvalidSubmitterField("phone"));
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_plausible_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 7
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'))
}
