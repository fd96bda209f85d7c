//! Per-field view behavior: the click-cycle state machine, geometry updates
//! with the minimum-size clamp, and the visual contract (colors, label,
//! label font size).

use shared_types::{Field, FieldKind};

/// Minimum interactive field size on either axis.
pub const MIN_FIELD_SIZE: f64 = 20.0;

pub const MIN_LABEL_FONT: f64 = 10.0;
pub const MAX_LABEL_FONT: f64 = 24.0;

/// Inset on each edge when an image response is rendered scaled to fill
/// the box.
pub const IMAGE_INSET: f64 = 4.0;

/// Interaction state of a single field view. Clicks cycle
/// `Idle -> Selected -> Resizing -> (open dialog) -> Idle`; the transitions
/// are driven by discrete events, never by a click counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldViewState {
    #[default]
    Idle,
    /// Delete affordance visible, transformer attached.
    Selected,
    /// Corner-handle resize enabled.
    Resizing,
}

/// What the host should do in response to a click on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Show the selection outline and delete glyph.
    Select,
    /// Enable the corner resize handles.
    EnableResize,
    /// Open the fill/edit dialog; the view resets to idle.
    OpenDialog,
}

impl FieldViewState {
    /// Advance the cycle by one click.
    #[must_use]
    pub fn click(self) -> (FieldViewState, ClickAction) {
        match self {
            FieldViewState::Idle => (FieldViewState::Selected, ClickAction::Select),
            FieldViewState::Selected => (FieldViewState::Resizing, ClickAction::EnableResize),
            FieldViewState::Resizing => (FieldViewState::Idle, ClickAction::OpenDialog),
        }
    }

    pub fn is_selected(self) -> bool {
        !matches!(self, FieldViewState::Idle)
    }
}

/// Drag-end: position updates apply in any state.
pub fn apply_move(field: &mut Field, x: f64, y: f64) {
    field.x_position = x;
    field.y_position = y;
}

/// Drag an already-placed field by a document-space delta. The page never
/// changes.
pub fn apply_move_by(field: &mut Field, dx: f64, dy: f64) {
    field.x_position += dx;
    field.y_position += dy;
}

/// Transform-end: the whole new box is rejected when either axis falls
/// under the minimum, leaving position and size untouched. Returns whether
/// the resize was applied.
pub fn apply_resize(field: &mut Field, x: f64, y: f64, width: f64, height: f64) -> bool {
    if width < MIN_FIELD_SIZE || height < MIN_FIELD_SIZE {
        return false;
    }
    field.x_position = x;
    field.y_position = y;
    field.width = width;
    field.height = height;
    true
}

/// Base color for a field, keyed by type, fill status, and ownership.
/// Filled always wins; unowned fields desaturate to gray.
pub fn field_color(field: &Field, owned: bool) -> &'static str {
    if !owned {
        return "#9ca3af";
    }
    if field.is_filled() {
        return "#10b981";
    }
    match field.kind {
        FieldKind::Signature | FieldKind::Initials => "#3b82f6",
        FieldKind::Stamp => "#8b5cf6",
        FieldKind::Text | FieldKind::Name | FieldKind::Email | FieldKind::Number => "#10b981",
        FieldKind::Date => "#f59e0b",
        FieldKind::Checkbox | FieldKind::Radio => "#ef4444",
    }
}

/// Render opacity: unowned fields fade to 60%.
pub fn field_opacity(owned: bool) -> f64 {
    if owned {
        1.0
    } else {
        0.6
    }
}

/// Label text. Filled image responses show a signed marker (the image
/// itself is rendered instead of the label); text responses display in
/// full; empty fields show their type, lock-prefixed when unowned.
pub fn field_label(field: &Field, owned: bool) -> String {
    if field.has_image_response() {
        return "\u{2713} SIGNED".into();
    }
    if let Some(response) = field.response.as_deref().filter(|r| !r.is_empty()) {
        return response.to_string();
    }
    let type_label = field.kind.to_string().to_uppercase();
    if owned {
        type_label
    } else {
        format!("\u{1f512} {type_label}")
    }
}

/// Label font size auto-fit to the box, bounded to `[10, 24]`. Image
/// responses render the image instead and pin the size to the minimum.
pub fn label_font_size(field: &Field, owned: bool) -> f64 {
    let text = field_label(field, owned);
    if text.is_empty() || field.has_image_response() {
        return MIN_LABEL_FONT;
    }
    let by_width = field.width / text.chars().count() as f64 * 1.2;
    let by_height = field.height * 0.4;
    by_width.min(by_height).clamp(MIN_LABEL_FONT, MAX_LABEL_FONT)
}
