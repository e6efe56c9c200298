//! # Contact Handlers
//!
//! Public contact form submission and the admin inbox.

use shared::{ContactMessage, ContactRequest, MessageResponse};

use crate::app::events::{AppEvent, Outcome};
use crate::app::state::NotificationLevel;
use crate::app::status::Op;
use crate::app::Store;
use crate::core::error::{AppError, Result};
use crate::utils::validation::validate_email;

impl Store {
    pub fn submit_contact(&self, request: ContactRequest) -> Result<()> {
        if request.name.trim().is_empty() || request.message.trim().is_empty() {
            return Err(AppError::Validation("Name and message are required".to_string()));
        }
        validate_email(&request.email).into_result()?;

        let generation = {
            let mut state = self.state.write();
            state.contacts.last_sent = None;
            state.contacts.status.begin(Op::SubmitContact)
        };
        let api = self.api.clone();
        self.spawn_request(
            generation,
            async move { api.submit_contact(request).await },
            AppEvent::ContactSubmitted,
        );
        Ok(())
    }

    pub fn fetch_contacts(&self) {
        let generation = self.state.write().contacts.status.begin(Op::FetchContacts);
        let api = self.api.clone();
        self.spawn_request(generation, async move { api.contacts().await }, AppEvent::ContactsResult);
    }

    // ---- reducers ----

    pub(crate) fn on_contact_submitted(&self, outcome: Outcome<MessageResponse>) {
        let mut state = self.state.write();
        if let Some(response) = state.contacts.status.resolve(Op::SubmitContact, outcome) {
            let message = if response.message.is_empty() {
                "Message sent successfully".to_string()
            } else {
                response.message
            };
            state.contacts.last_sent = Some(message.clone());
            state.notify(NotificationLevel::Success, message);
        }
    }

    pub(crate) fn on_contacts(&self, outcome: Outcome<Vec<ContactMessage>>) {
        let mut state = self.state.write();
        if let Some(messages) = state.contacts.status.resolve(Op::FetchContacts, outcome) {
            state.contacts.messages = messages;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests_support::offline_store;

    fn message(id: &str) -> ContactMessage {
        ContactMessage {
            id: id.to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: None,
            country: None,
            message: "Do you ship to Lisbon?".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_inbox_is_stored() {
        let (store, _) = offline_store();
        let generation = store.state.write().contacts.status.begin(Op::FetchContacts);
        store.handle_event(AppEvent::ContactsResult(Outcome::new(
            generation,
            Ok(vec![message("c1"), message("c2")]),
        )));

        let state = store.state.read();
        let ids: Vec<_> = state.contacts.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2"]);
        assert!(!state.contacts.status.is_loading());
    }

    #[test]
    fn test_submission_falls_back_to_default_message() {
        let (store, _) = offline_store();
        let generation = store.state.write().contacts.status.begin(Op::SubmitContact);
        store.handle_event(AppEvent::ContactSubmitted(Outcome::new(
            generation,
            Ok(MessageResponse { message: String::new() }),
        )));

        assert_eq!(
            store.state.read().contacts.last_sent.as_deref(),
            Some("Message sent successfully")
        );
    }

    #[test]
    fn test_submission_is_validated() {
        let (store, _) = offline_store();
        let request = ContactRequest {
            name: "Grace".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            country: None,
            message: "Hello".to_string(),
        };
        assert!(store.submit_contact(request).is_err());
        assert_eq!(store.outstanding(), 0);
    }
}
