//! Document scenario: who places fields and who fills them.

use serde::{Deserialize, Serialize};

/// Editing mode of a document.
///
/// Controls recipient auto-assignment on placement and which affordances
/// (recipient manager, public-link generation) the host shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scenario {
    /// Only the current user fills fields.
    #[default]
    #[serde(rename = "self")]
    SelfSign,
    /// The current user places fields and assigns them to invited
    /// recipients who sign later.
    #[serde(rename = "request")]
    Request,
    /// Fields are pre-placed and filled anonymously by public submitters.
    #[serde(rename = "template")]
    Template,
}

impl Scenario {
    /// Whether a newly dropped field is assigned to the current user without
    /// asking. `Request` defers assignment to the recipient selector.
    pub fn auto_assigns_current_user(self) -> bool {
        matches!(self, Scenario::SelfSign | Scenario::Template)
    }

    /// Whether the document is served to anonymous submitters by token.
    pub fn is_public(self) -> bool {
        matches!(self, Scenario::Template)
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::SelfSign => write!(f, "self"),
            Scenario::Request => write!(f, "request"),
            Scenario::Template => write!(f, "template"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(serde_json::to_string(&Scenario::SelfSign).unwrap(), "\"self\"");
        assert_eq!(serde_json::to_string(&Scenario::Request).unwrap(), "\"request\"");
        assert_eq!(
            serde_json::to_string(&Scenario::Template).unwrap(),
            "\"template\""
        );
        let back: Scenario = serde_json::from_str("\"self\"").unwrap();
        assert_eq!(back, Scenario::SelfSign);
    }

    #[test]
    fn assignment_policy() {
        assert!(Scenario::SelfSign.auto_assigns_current_user());
        assert!(Scenario::Template.auto_assigns_current_user());
        assert!(!Scenario::Request.auto_assigns_current_user());
        assert!(Scenario::Template.is_public());
    }
}
