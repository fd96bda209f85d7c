//! The widget catalog: every placeable field type with its palette label
//! and default box size. Pure data.

use shared_types::FieldKind;

/// A palette entry describing one placeable widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetDefinition {
    pub kind: FieldKind,
    pub label: &'static str,
    pub default_width: f64,
    pub default_height: f64,
}

/// Catalog order is palette display order.
pub const WIDGETS: [WidgetDefinition; 10] = [
    WidgetDefinition {
        kind: FieldKind::Signature,
        label: "Signature",
        default_width: 150.0,
        default_height: 60.0,
    },
    WidgetDefinition {
        kind: FieldKind::Initials,
        label: "Initials",
        default_width: 100.0,
        default_height: 50.0,
    },
    WidgetDefinition {
        kind: FieldKind::Stamp,
        label: "Stamp",
        default_width: 100.0,
        default_height: 100.0,
    },
    WidgetDefinition {
        kind: FieldKind::Text,
        label: "Text",
        default_width: 200.0,
        default_height: 50.0,
    },
    WidgetDefinition {
        kind: FieldKind::Name,
        label: "Name",
        default_width: 150.0,
        default_height: 40.0,
    },
    WidgetDefinition {
        kind: FieldKind::Email,
        label: "Email",
        default_width: 200.0,
        default_height: 40.0,
    },
    WidgetDefinition {
        kind: FieldKind::Number,
        label: "Number",
        default_width: 120.0,
        default_height: 40.0,
    },
    WidgetDefinition {
        kind: FieldKind::Date,
        label: "Date",
        default_width: 140.0,
        default_height: 40.0,
    },
    WidgetDefinition {
        kind: FieldKind::Checkbox,
        label: "Checkbox",
        default_width: 30.0,
        default_height: 30.0,
    },
    WidgetDefinition {
        kind: FieldKind::Radio,
        label: "Radio",
        default_width: 30.0,
        default_height: 30.0,
    },
];

/// Resolve a drop payload's widget type. Unknown payloads yield `None` and
/// the drop is ignored.
pub fn widget_for(kind: FieldKind) -> &'static WidgetDefinition {
    WIDGETS
        .iter()
        .find(|w| w.kind == kind)
        .expect("every field kind has a catalog entry")
}

/// Parse the drag payload string (`"signature"`, `"text"`, ...) as it
/// arrives from the palette's data-transfer.
pub fn widget_for_payload(payload: &str) -> Option<&'static WidgetDefinition> {
    WIDGETS.iter().find(|w| w.kind.to_string() == payload)
}
