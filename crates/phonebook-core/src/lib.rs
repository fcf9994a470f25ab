pub mod domain;
pub mod error;
pub mod filter;
pub mod form;
pub mod schema;
pub mod store;
pub mod submit;

pub use domain::*;
pub use error::CoreError;
pub use filter::ContactFilter;
pub use form::{ContactForm, FormActions, FormOptions};
pub use schema::{ContactSchema, Field, FieldError, ValidationErrors};
pub use store::{ContactBook, ContactStore, IdGenerator, UuidGenerator};
pub use submit::{add_contact, submit_contact, DuplicateContact};
