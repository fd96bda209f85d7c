//! Field interaction dialog model: resolves a field's response value.
//!
//! Non-signature fields collect a raw string through a text input whose
//! mode follows the field type. Signature and initials fields branch into
//! two tabs: pick a saved signature asset, or capture a new one.

use shared_types::{Field, FieldKind, SignatureAsset};

/// How the text input is presented for a given field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    /// Multi-line entry, generic `text` fields only.
    MultiLine { rows: u8 },
    SingleLine { mode: InputMode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Email,
    Numeric,
}

/// Tabs of the signature branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureTab {
    #[default]
    SelectExisting,
    CreateNew,
}

/// Loading state of the saved-signature gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryState {
    #[default]
    Loading,
    Loaded(Vec<SignatureAsset>),
}

/// Dialog state for one field's fill interaction.
#[derive(Debug, Clone)]
pub struct InteractionDialog {
    field_key: String,
    kind: FieldKind,
    value: String,
    tab: SignatureTab,
    gallery: GalleryState,
}

/// The dialog's terminal output: the string to store as the field's
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub field_key: String,
    pub value: String,
}

impl InteractionDialog {
    pub fn for_field(field: &Field) -> Self {
        Self {
            field_key: field.key.clone(),
            kind: field.kind,
            value: String::new(),
            tab: SignatureTab::default(),
            gallery: GalleryState::default(),
        }
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn is_signature_flow(&self) -> bool {
        self.kind.is_signature_like()
    }

    pub fn title(&self) -> String {
        match self.kind {
            FieldKind::Signature => "Sign Here".into(),
            FieldKind::Initials => "Add Initials".into(),
            kind => {
                let label = kind.to_string();
                let mut chars = label.chars();
                let capitalized = match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => label,
                };
                format!("Enter {capitalized}")
            }
        }
    }

    /// Input presentation for the non-signature branch; `None` for
    /// signature-like fields.
    pub fn text_input(&self) -> Option<TextInput> {
        if self.is_signature_flow() {
            return None;
        }
        Some(match self.kind {
            FieldKind::Text => TextInput::MultiLine { rows: 3 },
            FieldKind::Email => TextInput::SingleLine {
                mode: InputMode::Email,
            },
            FieldKind::Number => TextInput::SingleLine {
                mode: InputMode::Numeric,
            },
            _ => TextInput::SingleLine {
                mode: InputMode::Text,
            },
        })
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Save stays disabled while the entry is empty.
    pub fn can_save(&self) -> bool {
        !self.is_signature_flow() && !self.value.is_empty()
    }

    /// Commit the text entry. `None` while saving is disabled.
    pub fn save_text(self) -> Option<ResolvedValue> {
        if !self.can_save() {
            return None;
        }
        Some(ResolvedValue {
            field_key: self.field_key,
            value: self.value,
        })
    }

    pub fn tab(&self) -> SignatureTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: SignatureTab) {
        self.tab = tab;
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    /// Apply the result of the saved-signatures fetch. A load failure
    /// degrades to an empty gallery so the create-new path stays usable.
    pub fn apply_gallery<E: std::fmt::Display>(
        &mut self,
        result: Result<Vec<SignatureAsset>, E>,
    ) {
        let assets = match result {
            Ok(assets) => assets,
            Err(err) => {
                tracing::warn!(%err, "saved-signature fetch failed, showing empty gallery");
                Vec::new()
            }
        };
        self.gallery = GalleryState::Loaded(assets);
    }

    /// Pick a saved asset; its image resolves the field immediately.
    pub fn choose_existing(&self, index: usize) -> Option<ResolvedValue> {
        let GalleryState::Loaded(assets) = &self.gallery else {
            return None;
        };
        assets.get(index).map(|asset| ResolvedValue {
            field_key: self.field_key.clone(),
            value: asset.image.clone(),
        })
    }

    /// Finish the create-new branch with a freshly captured asset.
    pub fn accept_capture(self, asset: &SignatureAsset) -> ResolvedValue {
        ResolvedValue {
            field_key: self.field_key,
            value: asset.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{FieldOptions, SignatureKind};

    fn field(kind: FieldKind) -> Field {
        Field {
            key: "f-1".into(),
            kind,
            x_position: 0.0,
            y_position: 0.0,
            width: 150.0,
            height: 60.0,
            page_number: 1,
            recipient_id: None,
            response: None,
            options: FieldOptions::default(),
        }
    }

    fn asset(name: &str) -> SignatureAsset {
        SignatureAsset {
            id: Some("sig-1".into()),
            name: name.into(),
            image: format!("data:image/png;base64,{name}"),
            kind: SignatureKind::Drawn,
            font: None,
            color: Some("#000000".into()),
            created_at: None,
        }
    }

    #[test]
    fn titles_follow_field_type() {
        assert_eq!(
            InteractionDialog::for_field(&field(FieldKind::Signature)).title(),
            "Sign Here"
        );
        assert_eq!(
            InteractionDialog::for_field(&field(FieldKind::Initials)).title(),
            "Add Initials"
        );
        assert_eq!(
            InteractionDialog::for_field(&field(FieldKind::Date)).title(),
            "Enter Date"
        );
    }

    #[test]
    fn input_modes_follow_field_type() {
        let input = |kind| InteractionDialog::for_field(&field(kind)).text_input();
        assert_eq!(input(FieldKind::Text), Some(TextInput::MultiLine { rows: 3 }));
        assert_eq!(
            input(FieldKind::Email),
            Some(TextInput::SingleLine { mode: InputMode::Email })
        );
        assert_eq!(
            input(FieldKind::Number),
            Some(TextInput::SingleLine { mode: InputMode::Numeric })
        );
        assert_eq!(
            input(FieldKind::Date),
            Some(TextInput::SingleLine { mode: InputMode::Text })
        );
        assert_eq!(input(FieldKind::Signature), None);
    }

    #[test]
    fn save_disabled_while_empty() {
        let mut dialog = InteractionDialog::for_field(&field(FieldKind::Name));
        assert!(!dialog.can_save());
        assert!(dialog.clone().save_text().is_none());

        dialog.set_value("Jane Doe");
        assert!(dialog.can_save());
        let resolved = dialog.save_text().unwrap();
        assert_eq!(resolved.field_key, "f-1");
        assert_eq!(resolved.value, "Jane Doe");
    }

    #[test]
    fn gallery_failure_soft_fails_to_empty() {
        let mut dialog = InteractionDialog::for_field(&field(FieldKind::Signature));
        assert_eq!(dialog.gallery(), &GalleryState::Loading);

        dialog.apply_gallery::<&str>(Err("503 service unavailable"));
        assert_eq!(dialog.gallery(), &GalleryState::Loaded(Vec::new()));
        // Create-new still works against the empty gallery.
        assert!(dialog.choose_existing(0).is_none());

        let captured = asset("fresh");
        let resolved = dialog.accept_capture(&captured);
        assert_eq!(resolved.value, captured.image);
    }

    #[test]
    fn choosing_existing_resolves_immediately() {
        let mut dialog = InteractionDialog::for_field(&field(FieldKind::Initials));
        dialog.apply_gallery::<&str>(Ok(vec![asset("one"), asset("two")]));

        let resolved = dialog.choose_existing(1).unwrap();
        assert_eq!(resolved.value, "data:image/png;base64,two");
        assert!(dialog.choose_existing(5).is_none());
    }
}
