use once_cell::sync::Lazy;
use regex::Regex;

/// Latin or Cyrillic letters, with single apostrophes, dashes or spaces
/// between letter runs.
pub static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-Я]+(([' -][a-zA-Zа-яА-Я ])?[a-zA-Zа-яА-Я]*)*$")
        .expect("name pattern compiles")
});

pub fn matches_name_shape(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// Key used for duplicate detection: trimmed and lower-cased.
pub fn normalize_name_for_match(value: &str) -> String {
    value.trim().to_lowercase()
}
