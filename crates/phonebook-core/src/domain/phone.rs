use once_cell::sync::Lazy;
use regex::Regex;

/// Loose phone shape: optional `+` and leading digits, an optional
/// parenthesized group, then digits and dashes. Digits are ASCII only.
pub static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?[0-9]+)?\s*(\([0-9]+\))?[\s-]*([0-9-]*)$").expect("phone pattern compiles")
});

pub fn matches_phone_shape(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::matches_phone_shape;

    #[test]
    fn phone_shape_accepts_formatted_numbers() {
        assert!(matches_phone_shape("459-12-56"));
        assert!(matches_phone_shape("+1 (555) 123-4567"));
        assert!(matches_phone_shape("(044)1234567"));
        assert!(matches_phone_shape("+380501234567"));
    }

    #[test]
    fn phone_shape_keeps_loose_acceptance() {
        assert!(matches_phone_shape("-------"));
        assert!(matches_phone_shape(""));
    }

    #[test]
    fn phone_shape_rejects_letters_and_misplaced_plus() {
        assert!(!matches_phone_shape("555-CALL-NOW"));
        assert!(!matches_phone_shape("555+1234"));
        assert!(!matches_phone_shape("(555"));
        assert!(!matches_phone_shape("١٢٣٤٥٦٧"));
    }
}
