use anyhow::{anyhow, Result};
use phonebook_core::domain::ContactId;
use phonebook_core::store::{ContactBook, ContactStore, IdGenerator};
use phonebook_core::submit_contact;
use tracing::debug;

use crate::app::{App, FormFocus, Mode};

#[derive(Debug, Clone)]
pub enum Action {
    LoadList,
    SubmitContact,
    DeleteContact(ContactId),
}

pub fn execute_action<G>(
    app: &mut App,
    book: &mut ContactBook,
    ids: &mut G,
    action: Action,
) -> Result<()>
where
    G: IdGenerator + ?Sized,
{
    match action {
        Action::LoadList => {
            let items = book.filter(&app.filter);
            app.apply_list(items, book.contacts().len());
        }
        Action::SubmitContact => {
            let outcome = app
                .form
                .submit(|draft, actions| submit_contact(book, ids, draft, actions));
            match outcome {
                Err(errors) => {
                    debug!(errors = %errors, "contact form invalid");
                    app.set_error("Fix the highlighted fields before adding");
                }
                Ok(Err(duplicate)) => {
                    app.mode = Mode::Notice(duplicate.to_string());
                }
                Ok(Ok(contact)) => {
                    app.form_focus = FormFocus::Name;
                    app.set_status(format!("Added {}", contact.name));
                    app.clear_error();
                    app.pending_select = Some(contact.id);
                    app.enqueue(Action::LoadList);
                }
            }
        }
        Action::DeleteContact(contact_id) => {
            let contact = book
                .remove(contact_id)
                .ok_or_else(|| anyhow!("contact not found"))?;
            app.set_status(format!("Deleted {}", contact.name));
            app.enqueue(Action::LoadList);
        }
    }

    Ok(())
}
