use crate::domain::{Contact, ContactId};
use crate::filter::ContactFilter;

/// Shared contact list as seen by the form: an ordered read view and a
/// single append entry point.
pub trait ContactStore {
    fn contacts(&self) -> &[Contact];
    fn append(&mut self, contact: Contact);
}

pub trait IdGenerator {
    fn next_id(&mut self) -> ContactId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ContactId {
        ContactId::new()
    }
}

/// In-memory contact list owned by the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let pos = self.contacts.iter().position(|contact| contact.id == id)?;
        Some(self.contacts.remove(pos))
    }

    pub fn filter(&self, filter: &ContactFilter) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|contact| filter.matches(contact))
            .cloned()
            .collect()
    }
}

impl ContactStore for ContactBook {
    fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    fn append(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactBook, ContactStore, IdGenerator, UuidGenerator};
    use crate::domain::{Contact, ContactDraft, ContactId};

    fn contact(name: &str) -> Contact {
        Contact::from_draft(ContactId::new(), &ContactDraft::new(name, "555-1234"))
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut book = ContactBook::new();
        book.append(contact("Bob"));
        book.append(contact("Ann"));
        let names: Vec<&str> = book.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Ann"]);
    }

    #[test]
    fn remove_drops_only_matching_contact() {
        let mut book = ContactBook::new();
        let keep = contact("Keep");
        let drop = contact("Drop");
        book.append(keep.clone());
        book.append(drop.clone());

        let removed = book.remove(drop.id).expect("removed");
        assert_eq!(removed, drop);
        assert_eq!(book.contacts(), &[keep]);
        assert!(book.remove(drop.id).is_none());
    }

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
