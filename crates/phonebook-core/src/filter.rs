use crate::domain::{normalize_name_for_match, Contact};

/// Case-insensitive substring match on the contact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    needle: String,
}

impl ContactFilter {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: normalize_name_for_match(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.needle.is_empty() || contact.name.to_lowercase().contains(&self.needle)
    }
}
