use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::name::NAME_PATTERN;
use crate::domain::phone::PHONE_PATTERN;
use crate::domain::{ContactDraft, Field};
use crate::schema::rules::{FieldError, FieldSchema, Rule};

pub const TOO_SHORT: &str = "Too Short!";
pub const TOO_LONG: &str = "Too Long!";
pub const NAME_REQUIRED: &str = "Name is required";
pub const NUMBER_REQUIRED: &str = "Number is required";
pub const NAME_PATTERN_MESSAGE: &str = "Name may contain only letters, apostrophe, dash and spaces. For example Adrian, Jacob Mercer, Charles de Batz de Castelmore d'Artagnan";
pub const NUMBER_PATTERN_MESSAGE: &str = "Phone number is not valid";

pub const NAME_MIN_LEN: usize = 3;
pub const NUMBER_MIN_LEN: usize = 7;
pub const NUMBER_MAX_LEN: usize = 15;

/// Field schemas applied to a [`ContactDraft`], in field order.
#[derive(Debug, Clone)]
pub struct ContactSchema {
    fields: Vec<FieldSchema>,
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl ContactSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// The rules for the contact form. `Required` comes first so an empty
    /// value reports the required message rather than a length error.
    pub fn standard() -> Self {
        let name = FieldSchema::new(Field::Name)
            .trim()
            .rule(Rule::Required {
                message: NAME_REQUIRED,
            })
            .rule(Rule::MinLength {
                min: NAME_MIN_LEN,
                message: TOO_SHORT,
            })
            .rule(Rule::Matches {
                pattern: Lazy::force(&NAME_PATTERN),
                message: NAME_PATTERN_MESSAGE,
            });
        let number = FieldSchema::new(Field::Number)
            .trim()
            .rule(Rule::Required {
                message: NUMBER_REQUIRED,
            })
            .rule(Rule::MinLength {
                min: NUMBER_MIN_LEN,
                message: TOO_SHORT,
            })
            .rule(Rule::MaxLength {
                max: NUMBER_MAX_LEN,
                message: TOO_LONG,
            })
            .rule(Rule::Matches {
                pattern: Lazy::force(&PHONE_PATTERN),
                message: NUMBER_PATTERN_MESSAGE,
            });
        Self::new(vec![name, number])
    }

    pub fn field(&self, field: Field) -> Option<&FieldSchema> {
        self.fields.iter().find(|schema| schema.field == field)
    }

    pub fn validate_field(&self, field: Field, value: &str) -> Option<FieldError> {
        self.field(field).and_then(|schema| schema.check(value))
    }

    pub fn validate(&self, draft: &ContactDraft) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for schema in &self.fields {
            if let Some(err) = schema.check(draft.get(schema.field)) {
                errors.insert(err);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// At most one error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field, error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|err| err.message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RuleKind;

    fn name_error(value: &str) -> Option<&'static str> {
        ContactSchema::standard()
            .validate_field(Field::Name, value)
            .map(|err| err.message)
    }

    fn number_error(value: &str) -> Option<&'static str> {
        ContactSchema::standard()
            .validate_field(Field::Number, value)
            .map(|err| err.message)
    }

    #[test]
    fn empty_fields_report_required() {
        assert_eq!(name_error(""), Some(NAME_REQUIRED));
        assert_eq!(name_error("   "), Some(NAME_REQUIRED));
        assert_eq!(number_error(""), Some(NUMBER_REQUIRED));
        assert_eq!(number_error("\t"), Some(NUMBER_REQUIRED));
    }

    #[test]
    fn short_names_report_too_short_before_pattern() {
        for value in ["A", "Al", " Al ", "1", "@!", "а"] {
            assert_eq!(name_error(value), Some(TOO_SHORT), "value {value:?}");
        }
    }

    #[test]
    fn names_with_digits_or_symbols_report_pattern() {
        for value in ["R2D2", "Ada_Lovelace", "Jo.Ann", "Ann+Bob", "Zoë Saldana"] {
            assert_eq!(name_error(value), Some(NAME_PATTERN_MESSAGE), "value {value:?}");
        }
    }

    #[test]
    fn valid_names_pass() {
        for value in ["Ann", "  Jo Ann  ", "O'Neil", "Jean-Luc Picard", "Тарас Шевченко"] {
            assert_eq!(name_error(value), None, "value {value:?}");
        }
    }

    #[test]
    fn numbers_outside_length_bounds_report_length() {
        assert_eq!(number_error("123456"), Some(TOO_SHORT));
        assert_eq!(number_error("  12-34  "), Some(TOO_SHORT));
        assert_eq!(number_error("1234567890123456"), Some(TOO_LONG));
        assert_eq!(number_error("+1 (555) 123-4567"), Some(TOO_LONG));
        assert_eq!(number_error("1234567"), None);
        assert_eq!(number_error("123456789012345"), None);
    }

    #[test]
    fn malformed_numbers_report_pattern() {
        assert_eq!(number_error("555-CALL"), Some(NUMBER_PATTERN_MESSAGE));
        assert_eq!(number_error("12+34567"), Some(NUMBER_PATTERN_MESSAGE));
        assert_eq!(number_error("(555 1234"), Some(NUMBER_PATTERN_MESSAGE));
    }

    #[test]
    fn loose_number_shapes_are_accepted() {
        assert_eq!(number_error("459-12-56"), None);
        assert_eq!(number_error("(555)123-45"), None);
        assert_eq!(number_error("-------"), None);
    }

    #[test]
    fn validate_collects_one_error_per_field() {
        let schema = ContactSchema::standard();
        let errors = schema
            .validate(&ContactDraft::new("", "12"))
            .expect_err("both invalid");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message(Field::Name), Some(NAME_REQUIRED));
        let number = errors.get(Field::Number).expect("number error");
        assert_eq!(number.kind, RuleKind::TooShort);
        assert_eq!(
            errors.to_string(),
            "name: Name is required; number: Too Short!"
        );
    }

    #[test]
    fn validate_accepts_good_draft() {
        let schema = ContactSchema::standard();
        assert!(schema
            .validate(&ContactDraft::new("Rosie Simpson", "459-12-56"))
            .is_ok());
    }
}
