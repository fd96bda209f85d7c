//! End-to-end editor session scenarios: load, place, assign, fill, save.

use fieldsign_core::{ContainerRect, EditorSession, FieldClick, Placement};
use pretty_assertions::assert_eq;
use shared_types::{
    CurrentUser, DocumentResource, PublicFormConfig, Recipient, RequiredFields, Scenario,
    SubmitterInfo, CURRENT_USER_RECIPIENT_ID,
};

fn jane() -> CurrentUser {
    CurrentUser::new("Jane Doe", "jane@example.com")
}

fn recipient(id: &str, email: &str) -> Recipient {
    Recipient {
        id: id.into(),
        name: email.split('@').next().unwrap_or_default().into(),
        email: email.into(),
        role: "Signer".into(),
        is_current_user: false,
        contact_id: None,
    }
}

fn document(scenario: Scenario, recipients: Vec<Recipient>) -> DocumentResource {
    DocumentResource {
        id: Some("doc-1".into()),
        scenario,
        recipients,
        fields: Vec::new(),
        page_count: 5,
        public_form_config: None,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn self_sign_drop_auto_assigns_current_user() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(Scenario::SelfSign, Vec::new()));

    let placement = session
        .place_widget("text", 100.0, 100.0, ContainerRect { left: 0.0, top: 0.0 })
        .unwrap();
    let Placement::Placed { key } = placement else {
        panic!("self-sign drop should place immediately, got {placement:?}");
    };

    let field = session.field(&key).unwrap();
    assert_eq!(field.x_position, 100.0);
    assert_eq!(field.y_position, 100.0);
    assert_eq!(field.recipient_id.as_deref(), Some(CURRENT_USER_RECIPIENT_ID));
    assert_eq!(field.page_number, 1);
}

#[test]
fn zoomed_drop_lands_on_the_same_document_point() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(Scenario::SelfSign, Vec::new()));
    for _ in 0..10 {
        session.zoom_in();
    }
    assert_eq!(session.zoom().factor(), 2.0);

    // A drop at viewport (240, 180) inside a container at (40, 80) maps to
    // document (100, 50) at 2x zoom.
    let Placement::Placed { key } = session
        .place_widget("date", 240.0, 180.0, ContainerRect { left: 40.0, top: 80.0 })
        .unwrap()
    else {
        panic!("expected placement");
    };
    let field = session.field(&key).unwrap();
    assert_eq!(field.x_position, 100.0);
    assert_eq!(field.y_position, 50.0);
}

#[test]
fn request_drop_defers_to_recipient_selector() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(
        Scenario::Request,
        vec![
            recipient("recipient-a", "a@example.com"),
            recipient("recipient-b", "b@example.com"),
        ],
    ));
    session.go_to_page(2);

    let placement = session
        .place_widget("signature", 50.0, 60.0, ContainerRect::default())
        .unwrap();
    assert_eq!(placement, Placement::AwaitingRecipient);
    assert!(session.has_pending());
    assert!(session.fields().is_empty());

    let key = session.assign_pending("recipient-b").unwrap();
    let field = session.field(&key).unwrap();
    assert_eq!(field.recipient_id.as_deref(), Some("recipient-b"));
    // The field lives only on the page it was dropped on.
    assert_eq!(field.page_number, 2);
    assert_eq!(session.fields_on_page(2).count(), 1);
    assert_eq!(session.fields_on_page(1).count(), 0);
}

#[test]
fn canceling_the_selector_discards_the_pending_field() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(
        Scenario::Request,
        vec![recipient("recipient-a", "a@example.com")],
    ));

    session
        .place_widget("initials", 10.0, 10.0, ContainerRect::default())
        .unwrap();
    session.cancel_pending();
    assert!(!session.has_pending());
    assert!(session.fields().is_empty());
}

#[test]
fn save_body_groups_fields_by_page() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(Scenario::SelfSign, Vec::new()));

    let mut place = |page: u32, x: f64| {
        session.go_to_page(page);
        match session
            .place_widget("text", x, 10.0, ContainerRect::default())
            .unwrap()
        {
            Placement::Placed { key } => key,
            other => panic!("expected placement, got {other:?}"),
        }
    };
    let f1 = place(1, 10.0);
    let f2 = place(1, 200.0);
    let f3 = place(3, 10.0);

    let request = session.begin_save().unwrap();
    assert_eq!(request.placeholders.len(), 2);
    assert_eq!(request.placeholders[0].page_number, 1);
    assert_eq!(request.placeholders[0].pos.len(), 2);
    assert_eq!(request.placeholders[0].pos[0].key, f1);
    assert_eq!(request.placeholders[0].pos[1].key, f2);
    assert_eq!(request.placeholders[1].page_number, 3);
    assert_eq!(request.placeholders[1].pos[0].key, f3);
    // The sentinel recipient always travels with the layout.
    assert_eq!(request.recipients[0].id, CURRENT_USER_RECIPIENT_ID);

    // The serialized body carries the exact wire keys.
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["placeholders"][0]["pageNumber"], 1);
    assert!(json["placeholders"][0]["pos"][0].get("pageNumber").is_none());
}

#[test]
fn loaded_layout_round_trips_through_save() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(Scenario::SelfSign, Vec::new()));
    session.go_to_page(2);
    session
        .place_widget("signature", 30.0, 40.0, ContainerRect::default())
        .unwrap();

    let saved = session.begin_save().unwrap();
    session.finish_save(true);

    // A later session loads the persisted grouped layout.
    let mut reloaded = EditorSession::new(jane());
    reloaded.load_document(DocumentResource {
        id: Some("doc-1".into()),
        scenario: Scenario::SelfSign,
        recipients: saved.recipients.clone(),
        fields: saved.placeholders.clone(),
        page_count: 5,
        public_form_config: None,
        created_at: None,
        updated_at: None,
    });

    assert_eq!(reloaded.fields().len(), 1);
    let field = &reloaded.fields()[0];
    assert_eq!(field.page_number, 2);
    assert_eq!(field.x_position, 30.0);

    // And saving again reproduces the identical grouped payload.
    let again = reloaded.begin_save().unwrap();
    assert_eq!(again.placeholders, saved.placeholders);
}

#[test]
fn filled_signature_renders_and_fills_only_for_owner() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(
        Scenario::Request,
        vec![recipient("recipient-b", "b@example.com")],
    ));

    // One field for the current user, one for recipient B.
    session
        .place_widget("signature", 10.0, 10.0, ContainerRect::default())
        .unwrap();
    let mine = session.assign_pending(CURRENT_USER_RECIPIENT_ID).unwrap();
    session
        .place_widget("signature", 10.0, 120.0, ContainerRect::default())
        .unwrap();
    let theirs = session.assign_pending("recipient-b").unwrap();
    session.deselect();

    session
        .fill_field(&mine, "data:image/png;base64,iVBOR")
        .unwrap();
    assert!(session.fill_field(&theirs, "data:image/png;base64,iVBOR").is_err());

    // Third click opens the dialog only on the owned field.
    for _ in 0..2 {
        session.click_field(&mine).unwrap();
    }
    assert_eq!(session.click_field(&mine).unwrap(), FieldClick::OpenDialog);
    for _ in 0..2 {
        session.click_field(&theirs).unwrap();
    }
    assert_eq!(
        session.click_field(&theirs).unwrap(),
        FieldClick::FillNotPermitted
    );
}

#[test]
fn resize_below_minimum_leaves_geometry_untouched() {
    let mut session = EditorSession::new(jane());
    session.load_document(document(Scenario::SelfSign, Vec::new()));
    let Placement::Placed { key } = session
        .place_widget("checkbox", 50.0, 50.0, ContainerRect::default())
        .unwrap()
    else {
        panic!("expected placement");
    };

    assert!(!session.resize_field(&key, 0.0, 0.0, 19.0, 40.0).unwrap());
    let field = session.field(&key).unwrap();
    assert_eq!((field.x_position, field.y_position), (50.0, 50.0));
    assert_eq!((field.width, field.height), (30.0, 30.0));

    assert!(session.resize_field(&key, 45.0, 45.0, 60.0, 20.0).unwrap());
    let field = session.field(&key).unwrap();
    assert_eq!((field.width, field.height), (60.0, 20.0));
}

#[test]
fn public_submission_blocks_on_missing_required_email() {
    let mut session = EditorSession::new(CurrentUser::new("", "anon@example.com"));
    session.load_public_form(
        "tok-9",
        DocumentResource {
            id: None,
            scenario: Scenario::Template,
            recipients: Vec::new(),
            fields: Vec::new(),
            page_count: 1,
            public_form_config: Some(PublicFormConfig {
                required_fields: RequiredFields {
                    name: false,
                    email: true,
                    phone: false,
                },
                public_url: None,
                public_token: Some("tok-9".into()),
            }),
            created_at: None,
            updated_at: None,
        },
    );

    // No request body exists while validation fails: no POST can be issued.
    let blank = SubmitterInfo {
        name: "Anon".into(),
        email: String::new(),
        phone: String::new(),
    };
    assert!(session.begin_public_submission(&blank).is_err());
    assert!(!session.is_saving());

    let filled = SubmitterInfo {
        name: "Anon".into(),
        email: "anon@example.com".into(),
        phone: String::new(),
    };
    let submission = session.begin_public_submission(&filled).unwrap();
    assert_eq!(submission.email, "anon@example.com");
    assert_eq!(session.public_token(), Some("tok-9"));
}
