use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{normalize_name_for_match, Contact, ContactDraft};
use crate::error::CoreError;
use crate::form::FormActions;
use crate::schema::ContactSchema;
use crate::store::{ContactStore, IdGenerator};

/// A contact with the same name (ignoring case) is already in the list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{name} is already in contacts.")]
pub struct DuplicateContact {
    pub name: String,
}

/// Adds the draft to `store` unless its name collides with an existing
/// contact, then asks the form to reset. On collision nothing is appended and
/// the form is left as is.
pub fn submit_contact<S, G>(
    store: &mut S,
    ids: &mut G,
    draft: &ContactDraft,
    actions: &mut FormActions,
) -> Result<Contact, DuplicateContact>
where
    S: ContactStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    let name = draft.name.trim();
    let normalized = normalize_name_for_match(name);

    if store
        .contacts()
        .iter()
        .any(|existing| normalize_name_for_match(&existing.name) == normalized)
    {
        debug!(name, "rejected duplicate contact");
        return Err(DuplicateContact {
            name: name.to_string(),
        });
    }

    let contact = Contact::from_draft(ids.next_id(), draft);
    debug!(id = %contact.id, name = %contact.name, "appending contact");
    store.append(contact.clone());
    actions.reset_form();
    Ok(contact)
}

/// Validates and submits a draft outside of a form, e.g. contacts loaded at
/// startup.
pub fn add_contact<S, G>(
    schema: &ContactSchema,
    store: &mut S,
    ids: &mut G,
    draft: &ContactDraft,
) -> Result<Contact, CoreError>
where
    S: ContactStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    schema.validate(draft)?;
    let mut actions = FormActions::default();
    Ok(submit_contact(store, ids, draft, &mut actions)?)
}

#[cfg(test)]
mod tests {
    use super::{add_contact, submit_contact, DuplicateContact};
    use crate::domain::{ContactDraft, Field};
    use crate::error::CoreError;
    use crate::form::FormActions;
    use crate::schema::ContactSchema;
    use crate::store::{ContactBook, ContactStore, UuidGenerator};

    #[test]
    fn duplicate_message_is_literal() {
        let err = DuplicateContact {
            name: "Anna Lee".to_string(),
        };
        assert_eq!(err.to_string(), "Anna Lee is already in contacts.");
    }

    #[test]
    fn rejection_leaves_reset_unrequested() {
        let mut book = ContactBook::new();
        let mut ids = UuidGenerator;
        let draft = ContactDraft::new("Anna Lee", "555-1234");

        let mut actions = FormActions::default();
        submit_contact(&mut book, &mut ids, &draft, &mut actions).expect("first add");
        assert!(actions.reset_requested());

        let mut actions = FormActions::default();
        let err = submit_contact(&mut book, &mut ids, &draft, &mut actions)
            .expect_err("second add is a duplicate");
        assert_eq!(err.name, "Anna Lee");
        assert!(!actions.reset_requested());
        assert_eq!(book.contacts().len(), 1);
    }

    #[test]
    fn add_contact_validates_before_dedup() {
        let schema = ContactSchema::standard();
        let mut book = ContactBook::new();
        let mut ids = UuidGenerator;

        let err = add_contact(&schema, &mut book, &mut ids, &ContactDraft::new("Al", "5551234"))
            .expect_err("too short");
        match err {
            CoreError::Validation(errors) => {
                assert_eq!(errors.message(Field::Name), Some("Too Short!"))
            }
            other => panic!("unexpected error: {other}"),
        }

        let draft = ContactDraft::new("Alice", "5551234");
        add_contact(&schema, &mut book, &mut ids, &draft).expect("added");
        let err = add_contact(&schema, &mut book, &mut ids, &draft).expect_err("duplicate");
        assert_eq!(err.to_string(), "Alice is already in contacts.");
        assert_eq!(book.contacts().len(), 1);
    }
}
