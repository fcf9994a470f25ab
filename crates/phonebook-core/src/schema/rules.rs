use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::domain::Field;

/// A single check applied to a field value. Lengths count characters.
#[derive(Debug, Clone)]
pub enum Rule {
    Required {
        message: &'static str,
    },
    MinLength {
        min: usize,
        message: &'static str,
    },
    MaxLength {
        max: usize,
        message: &'static str,
    },
    Matches {
        pattern: &'static Regex,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    TooShort,
    TooLong,
    Pattern,
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required { .. } => RuleKind::Required,
            Rule::MinLength { .. } => RuleKind::TooShort,
            Rule::MaxLength { .. } => RuleKind::TooLong,
            Rule::Matches { .. } => RuleKind::Pattern,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Matches { message, .. } => *message,
        }
    }

    fn passes(&self, value: &str) -> bool {
        match self {
            Rule::Required { .. } => !value.is_empty(),
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::MaxLength { max, .. } => value.chars().count() <= *max,
            Rule::Matches { pattern, .. } => pattern.is_match(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub kind: RuleKind,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Ordered rules for one field. Only the first failing rule is reported.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field: Field,
    pub trim: bool,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            trim: false,
            rules: Vec::new(),
        }
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn check(&self, raw: &str) -> Option<FieldError> {
        let value = if self.trim { raw.trim() } else { raw };
        self.rules
            .iter()
            .find(|rule| !rule.passes(value))
            .map(|rule| FieldError {
                field: self.field,
                kind: rule.kind(),
                message: rule.message(),
            })
    }
}
