//! Scenario-driven placement and fill policy.

use shared_types::{Field, Scenario};

/// Whether the current user may fill the given field.
///
/// Self-sign and template documents have a sole filling party, so every
/// field is fillable. Request documents gate on assignment: only fields
/// assigned to the current user's sentinel id open the fill dialog.
pub fn can_fill_field(scenario: Scenario, current_user_id: &str, field: &Field) -> bool {
    match scenario {
        Scenario::SelfSign | Scenario::Template => true,
        Scenario::Request => field.recipient_id.as_deref() == Some(current_user_id),
    }
}

/// Recipient a newly dropped field is assigned to, when the scenario
/// decides without asking. `None` means the recipient selector must
/// resolve it.
pub fn auto_assignment(scenario: Scenario, current_user_id: &str) -> Option<String> {
    scenario
        .auto_assigns_current_user()
        .then(|| current_user_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{FieldKind, FieldOptions, CURRENT_USER_RECIPIENT_ID};

    fn field(recipient_id: Option<&str>) -> Field {
        Field {
            key: "f".into(),
            kind: FieldKind::Signature,
            x_position: 0.0,
            y_position: 0.0,
            width: 150.0,
            height: 60.0,
            page_number: 1,
            recipient_id: recipient_id.map(Into::into),
            response: None,
            options: FieldOptions::default(),
        }
    }

    #[test]
    fn request_scenario_gates_on_assignment() {
        let me = CURRENT_USER_RECIPIENT_ID;
        assert!(can_fill_field(Scenario::Request, me, &field(Some(me))));
        assert!(!can_fill_field(
            Scenario::Request,
            me,
            &field(Some("recipient-7"))
        ));
        assert!(!can_fill_field(Scenario::Request, me, &field(None)));
    }

    #[test]
    fn self_and_template_always_fillable() {
        let me = CURRENT_USER_RECIPIENT_ID;
        for scenario in [Scenario::SelfSign, Scenario::Template] {
            assert!(can_fill_field(scenario, me, &field(Some("recipient-7"))));
            assert!(can_fill_field(scenario, me, &field(None)));
        }
    }

    #[test]
    fn auto_assignment_defers_only_for_request() {
        let me = CURRENT_USER_RECIPIENT_ID;
        assert_eq!(auto_assignment(Scenario::SelfSign, me).as_deref(), Some(me));
        assert_eq!(auto_assignment(Scenario::Template, me).as_deref(), Some(me));
        assert_eq!(auto_assignment(Scenario::Request, me), None);
    }
}
