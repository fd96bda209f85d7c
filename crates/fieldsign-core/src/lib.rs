//! Field-placement editor core.
//!
//! Everything the PDF field editor does between the rendering host and the
//! document API: the widget catalog, the zoom/coordinate mapper, the
//! per-field interaction machine and visual contract, the recipient roster,
//! scenario policy, the fill dialog model, and the orchestrating session.
//!
//! The crate is sans-I/O: it builds request bodies and applies responses;
//! transport belongs to the shell.

pub mod catalog;
pub mod coords;
pub mod dialog;
pub mod editor;
pub mod policy;
pub mod roster;
pub mod view;

pub use catalog::{widget_for, widget_for_payload, WidgetDefinition, WIDGETS};
pub use coords::{document_to_viewport, viewport_to_document, ContainerRect, Zoom};
pub use dialog::{GalleryState, InteractionDialog, ResolvedValue, SignatureTab, TextInput};
pub use editor::{EditorError, EditorPhase, EditorSession, FieldClick, Placement};
pub use policy::can_fill_field;
pub use roster::Roster;
pub use view::{ClickAction, FieldViewState, MIN_FIELD_SIZE};
