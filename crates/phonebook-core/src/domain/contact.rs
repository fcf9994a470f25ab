use crate::domain::ids::ContactId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

impl Contact {
    /// Builds a contact from raw field values, trimming both. Case is kept.
    pub fn from_draft(id: ContactId, draft: &ContactDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            number: draft.number.trim().to_string(),
        }
    }
}

/// Raw, untrimmed values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub number: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// The two inputs of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Number,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Number];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Number => "number",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Number => "Number",
        }
    }
}

impl ContactDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Number => &self.number,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => self.name = value.into(),
            Field::Number => self.number = value.into(),
        }
    }
}
