use thiserror::Error;

use crate::schema::ValidationErrors;
use crate::submit::DuplicateContact;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Duplicate(#[from] DuplicateContact),
}
