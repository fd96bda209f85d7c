//! Shared domain and wire types for the fieldsign workspace.
//!
//! Everything that crosses the document API boundary lives here: fields and
//! their options, recipients and contacts, document scenarios, public-form
//! configuration, signature assets, and the page-grouped placeholder shape
//! the save/load contract is built on.

pub mod document;
pub mod field;
pub mod layout;
pub mod recipient;
pub mod scenario;

pub use document::{
    CreatePublicFormRequest, CreatePublicFormResponse, DocumentResource, FieldValueSync,
    PublicFormConfig, PublicSubmission, RequiredFields, SaveFieldsRequest, SignatureAsset,
    SignatureKind, SubmissionRecord, SubmitterInfo,
};
pub use field::{Field, FieldKind, FieldOptions, FieldStatus, PlacedField};
pub use layout::{flatten_placeholders, group_by_page, Placeholder};
pub use recipient::{Contact, CurrentUser, Recipient, CURRENT_USER_RECIPIENT_ID};
pub use scenario::Scenario;
