use std::collections::BTreeSet;

use crate::domain::{ContactDraft, Field};
use crate::schema::{ContactSchema, FieldError, ValidationErrors};

/// When the form re-runs the schema outside of submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    pub validate_on_change: bool,
    pub validate_on_blur: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
        }
    }
}

/// Handle given to a submit handler. Requests made through it are applied to
/// the form once the handler returns.
#[derive(Debug, Default)]
pub struct FormActions {
    reset: bool,
}

impl FormActions {
    pub fn reset_form(&mut self) {
        self.reset = true;
    }

    pub fn reset_requested(&self) -> bool {
        self.reset
    }
}

/// Field values, touched flags and the latest validation result for the
/// contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    schema: ContactSchema,
    options: FormOptions,
    values: ContactDraft,
    touched: BTreeSet<Field>,
    errors: ValidationErrors,
    submit_count: u32,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(ContactSchema::standard(), FormOptions::default())
    }
}

impl ContactForm {
    pub fn new(schema: ContactSchema, options: FormOptions) -> Self {
        Self {
            schema,
            options,
            values: ContactDraft::default(),
            touched: BTreeSet::new(),
            errors: ValidationErrors::default(),
            submit_count: 0,
        }
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn values(&self) -> &ContactDraft {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        if self.options.validate_on_change {
            self.run_validation();
        }
    }

    /// Marks the field as interacted with, which makes its error visible.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        if self.options.validate_on_blur {
            self.run_validation();
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Errors from the most recent validation run, touched or not.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The error to display for a field: only once it has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&FieldError> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.schema.validate(&self.values).is_ok()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Touches every field and validates. When the values pass, hands them to
    /// `on_submit` together with a [`FormActions`] handle; otherwise returns
    /// the errors and leaves the handler uncalled.
    pub fn submit<T>(
        &mut self,
        on_submit: impl FnOnce(&ContactDraft, &mut FormActions) -> T,
    ) -> Result<T, ValidationErrors> {
        self.submit_count += 1;
        self.touched.extend(Field::ALL);
        self.run_validation();
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        let mut actions = FormActions::default();
        let output = on_submit(&self.values, &mut actions);
        if actions.reset_requested() {
            self.reset();
        }
        Ok(output)
    }

    /// Back to empty values with nothing touched and no errors.
    pub fn reset(&mut self) {
        self.values = ContactDraft::default();
        self.touched.clear();
        self.errors = ValidationErrors::default();
        self.submit_count = 0;
    }

    fn run_validation(&mut self) {
        self.errors = match self.schema.validate(&self.values) {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors,
        };
    }
}
