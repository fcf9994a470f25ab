pub mod contact;
pub mod rules;

pub use crate::domain::Field;
pub use contact::{ContactSchema, ValidationErrors};
pub use rules::{FieldError, FieldSchema, Rule, RuleKind};
