//! The recipient roster and its current-user invariant.
//!
//! A document's recipient list always contains exactly one entry for the
//! authenticated user, first in the list and never removable. External
//! lists (loaded documents, host updates) are normalized through
//! [`Roster::ensure_current_user`] on the way in.

use shared_types::{Contact, CurrentUser, Recipient};

/// Recipient list for one document, owned by the editor session. The
/// current user is passed in explicitly rather than read from ambient
/// state.
#[derive(Debug, Clone)]
pub struct Roster {
    current_user: CurrentUser,
    recipients: Vec<Recipient>,
}

impl Roster {
    pub fn new(current_user: CurrentUser) -> Self {
        let sentinel = current_user.as_recipient();
        Self {
            current_user,
            recipients: vec![sentinel],
        }
    }

    /// Adopt an externally-supplied list, re-establishing the invariant:
    /// any entry sharing the current user's email is replaced by the
    /// canonical sentinel entry, which is prepended.
    pub fn from_external(current_user: CurrentUser, external: Vec<Recipient>) -> Self {
        let mut roster = Self::new(current_user);
        for recipient in external {
            roster.add(recipient);
        }
        roster
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn current_user(&self) -> &CurrentUser {
        &self.current_user
    }

    pub fn current_user_id(&self) -> &str {
        &self.recipients[0].id
    }

    pub fn by_id(&self, id: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.id == id)
    }

    /// Add a recipient, deduplicating by email. The current user's email
    /// never gains a second entry, and only the sentinel entry may carry
    /// the current-user flag. Returns whether the list changed.
    pub fn add(&mut self, mut recipient: Recipient) -> bool {
        if self
            .recipients
            .iter()
            .any(|r| r.email.eq_ignore_ascii_case(&recipient.email))
        {
            return false;
        }
        recipient.is_current_user = false;
        self.recipients.push(recipient);
        true
    }

    /// Add a recipient sourced from an address-book contact.
    pub fn add_contact(&mut self, contact: &Contact) -> bool {
        self.add(Recipient::from_contact(contact))
    }

    /// Remove by id. Removing the current-user entry is a no-op. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if id == self.current_user_id() {
            return false;
        }
        let before = self.recipients.len();
        self.recipients.retain(|r| r.id != id);
        self.recipients.len() != before
    }

    /// Contacts from the address book still eligible as recipients,
    /// filtered by the search query.
    pub fn available_contacts<'c>(
        &self,
        contacts: &'c [Contact],
        query: &str,
    ) -> Vec<&'c Contact> {
        contacts
            .iter()
            .filter(|c| c.matches(query))
            .filter(|c| {
                !self
                    .recipients
                    .iter()
                    .any(|r| r.email.eq_ignore_ascii_case(&c.email))
            })
            .collect()
    }
}
