//! Recipients and the address-book contacts they are sourced from.

use serde::{Deserialize, Serialize};

/// Reserved id for the authenticated user's recipient entry. Exactly one
/// recipient with this id exists per document, always at index 0.
pub const CURRENT_USER_RECIPIENT_ID: &str = "recipient-current-user";

/// A party eligible to fill or sign fields on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "isCurrentUser", default)]
    pub is_current_user: bool,
    #[serde(rename = "contactId", default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

impl Recipient {
    /// Recipient entry backed by an address-book contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: format!("recipient-{}", contact.id),
            name: contact.name.clone(),
            email: contact.email.clone(),
            role: "Signer".into(),
            is_current_user: false,
            contact_id: Some(contact.id.clone()),
        }
    }
}

/// An address-book contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
}

impl Contact {
    /// Case-insensitive search across name, email and company.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
            || self.company.to_lowercase().contains(&q)
    }
}

/// The authenticated user, passed explicitly into any component that needs
/// identity instead of being read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let email = email.into();
        // Fall back to the email when the profile has no usable name.
        let name = if name.trim().is_empty() {
            email.clone()
        } else {
            name
        };
        Self { name, email }
    }

    /// The sentinel recipient entry representing this user.
    pub fn as_recipient(&self) -> Recipient {
        Recipient {
            id: CURRENT_USER_RECIPIENT_ID.into(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: "Signer".into(),
            is_current_user: true,
            contact_id: None,
        }
    }
}
