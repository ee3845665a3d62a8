//! Validators for the complainant's personal details.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FieldResult, Rejection, ValidationContext};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s.]+$").expect("name pattern is valid"));

static DISTRICT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("district pattern is valid"));

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern is valid"));

static PIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("pin pattern is valid"));

/// Person name: 2–50 characters of letters, spaces and periods.
///
/// Words are capitalised and initials keep their dots, so
/// `j.k. rowling` becomes `J.K. Rowling`.
pub fn validate_name(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let name = raw.trim();
    let len = name.chars().count();
    if len < 2 {
        return Err(Rejection::new("Name must be at least 2 characters long"));
    }
    if len > 50 {
        return Err(Rejection::new("Name must not exceed 50 characters"));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(Rejection::new(
            "Name should contain only alphabets, spaces, and dots (for initials)",
        ));
    }
    if !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Rejection::new("Name must contain at least one letter"));
    }

    let normalized = name
        .split_whitespace()
        .filter(|word| word.chars().any(|c| c != '.'))
        .map(capitalise_initials)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(normalized)
}

/// Indian mobile number, normalized to E.164 (`+91XXXXXXXXXX`).
///
/// Spaces, dashes and parentheses are ignored, as is a `+91`, `91` or `0`
/// prefix in front of the ten national digits.
pub fn validate_mobile(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let national = if let Some(rest) = cleaned.strip_prefix("+91") {
        rest
    } else if cleaned.len() == 12 && cleaned.starts_with("91") {
        &cleaned[2..]
    } else if cleaned.len() == 11 && cleaned.starts_with('0') {
        &cleaned[1..]
    } else {
        cleaned.as_str()
    };

    if national.len() != 10 || !national.chars().all(|c| c.is_ascii_digit()) {
        return Err(Rejection::new(
            "Invalid mobile number. Please enter a valid 10-digit number",
        ));
    }
    if !MOBILE_PATTERN.is_match(national) {
        return Err(Rejection::new(
            "Invalid mobile number format. Indian mobile numbers start with 6, 7, 8 or 9",
        ));
    }
    Ok(format!("+91{}", national))
}

/// District: 2–50 characters of letters and spaces, title-cased.
pub fn validate_district(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let district = raw.trim();
    let len = district.chars().count();
    if len < 2 {
        return Err(Rejection::new(
            "District name must be at least 2 characters long",
        ));
    }
    if len > 50 {
        return Err(Rejection::new("District name must not exceed 50 characters"));
    }
    if !DISTRICT_PATTERN.is_match(district) {
        return Err(Rejection::new(
            "District name should contain only alphabets and spaces",
        ));
    }
    Ok(district
        .split_whitespace()
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" "))
}

/// Six digit Indian PIN code that does not start with 0.
pub fn validate_pin_code(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let pin = raw.trim();
    if !PIN_PATTERN.is_match(pin) {
        return Err(Rejection::new(
            "Invalid PIN code. Must be 6 digits and cannot start with 0",
        ));
    }
    Ok(pin.to_string())
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn capitalise_initials(word: &str) -> String {
    word.split('.').map(capitalise).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::test_support::ctx;
    use proptest::prelude::*;

    mod name {
        use super::*;

        #[test]
        fn accepts_plain_name_as_is() {
            assert_eq!(validate_name("John Smith", &ctx()), Ok("John Smith".to_string()));
        }

        #[test]
        fn rejects_digits() {
            let err = validate_name("John123", &ctx()).unwrap_err();
            assert!(err.reason().contains("only alphabets"));
        }

        #[test]
        fn normalizes_case_and_initials() {
            assert_eq!(
                validate_name("  JEEVIKESH s.  ", &ctx()),
                Ok("Jeevikesh S.".to_string())
            );
            assert_eq!(validate_name("jeevikesh .s", &ctx()), Ok("Jeevikesh .S".to_string()));
            assert_eq!(validate_name("j.k. rowling", &ctx()), Ok("J.K. Rowling".to_string()));
        }

        #[test]
        fn drops_standalone_dots() {
            assert_eq!(validate_name("Ravi . Kumar", &ctx()), Ok("Ravi Kumar".to_string()));
        }

        #[test]
        fn enforces_length_bounds() {
            assert!(validate_name("A", &ctx()).is_err());
            assert!(validate_name(&"a".repeat(51), &ctx()).is_err());
            assert!(validate_name(&"a".repeat(50), &ctx()).is_ok());
        }

        #[test]
        fn rejects_dots_only() {
            assert!(validate_name("...", &ctx()).is_err());
        }
    }

    mod mobile {
        use super::*;

        #[test]
        fn accepts_ten_digits() {
            assert_eq!(validate_mobile("9876543210", &ctx()), Ok("+919876543210".to_string()));
        }

        #[test]
        fn accepts_country_code_and_separators() {
            assert_eq!(
                validate_mobile("+91 98765-43210", &ctx()),
                Ok("+919876543210".to_string())
            );
            assert_eq!(validate_mobile("919876543210", &ctx()), Ok("+919876543210".to_string()));
            assert_eq!(validate_mobile("09876543210", &ctx()), Ok("+919876543210".to_string()));
        }

        #[test]
        fn rejects_invalid_prefix() {
            let err = validate_mobile("5876543210", &ctx()).unwrap_err();
            assert!(err.reason().contains("6, 7, 8 or 9"));
        }

        #[test]
        fn rejects_wrong_length() {
            assert!(validate_mobile("98765", &ctx()).is_err());
            assert!(validate_mobile("98765432101", &ctx()).is_err());
            assert!(validate_mobile("98765abcde", &ctx()).is_err());
        }
    }

    mod district {
        use super::*;

        #[test]
        fn title_cases() {
            assert_eq!(validate_district("north  goa", &ctx()), Ok("North Goa".to_string()));
        }

        #[test]
        fn rejects_periods_and_digits() {
            assert!(validate_district("St. Thomas", &ctx()).is_err());
            assert!(validate_district("Zone 5", &ctx()).is_err());
        }
    }

    mod pin_code {
        use super::*;

        #[test]
        fn accepts_six_digits() {
            assert_eq!(validate_pin_code(" 600001 ", &ctx()), Ok("600001".to_string()));
        }

        #[test]
        fn rejects_leading_zero_and_bad_length() {
            assert!(validate_pin_code("060001", &ctx()).is_err());
            assert!(validate_pin_code("60001", &ctx()).is_err());
            assert!(validate_pin_code("6000011", &ctx()).is_err());
        }
    }

    proptest! {
        #[test]
        fn names_with_digits_are_always_rejected(prefix in "[A-Za-z ]{1,20}", digit in 0u8..10) {
            let raw = format!("{}{}", prefix, digit);
            prop_assert!(validate_name(&raw, &ctx()).is_err());
        }

        #[test]
        fn accepted_names_are_fixed_points(raw in "[A-Za-z]{2,20}( [A-Za-z]{1,10}){0,2}") {
            let first = validate_name(&raw, &ctx()).unwrap();
            prop_assert_eq!(validate_name(&first, &ctx()), Ok(first.clone()));
        }

        #[test]
        fn valid_mobiles_normalize_to_e164(rest in "[0-9]{9}", lead in 6u8..10) {
            let raw = format!("{}{}", lead, rest);
            prop_assert_eq!(validate_mobile(&raw, &ctx()), Ok(format!("+91{}", raw)));
        }
    }
}
