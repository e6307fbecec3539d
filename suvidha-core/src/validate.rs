//! Pure validation for the citizen details form. Rules run in a fixed
//! order and the first failure wins; nothing is mutated.

use crate::i18n::key;
use std::fmt;
use thiserror::Error;

/// Raw values captured on the form screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub mobile: String,
    pub problem: String,
    pub file_name: Option<String>,
}

/// A required form field, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Mobile,
    Problem,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Mobile => "mobile",
            Field::Problem => "problem",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    MissingField(Field),
    #[error("mobile number must be exactly 10 digits")]
    InvalidMobileFormat,
}

impl ValidationError {
    /// Catalog key for the message shown next to the form.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => key::MISSING_FIELD,
            ValidationError::InvalidMobileFormat => key::INVALID_MOBILE,
        }
    }
}

/// Validated, normalized form values ready for payload assembly. The mobile
/// number is reduced to its digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub name: String,
    pub mobile: String,
    pub problem: String,
    pub file_name: Option<String>,
}

/// Check the form, first failure wins: name/mobile/problem must be
/// non-empty after trimming, then the mobile number must contain exactly
/// 10 digits once separators are stripped.
pub fn validate(input: &FormInput) -> Result<ValidForm, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField(Field::Name));
    }
    if input.mobile.trim().is_empty() {
        return Err(ValidationError::MissingField(Field::Mobile));
    }
    let problem = input.problem.trim();
    if problem.is_empty() {
        return Err(ValidationError::MissingField(Field::Problem));
    }

    let digits: String = input.mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(ValidationError::InvalidMobileFormat);
    }

    Ok(ValidForm {
        name: name.to_string(),
        mobile: digits,
        problem: problem.to_string(),
        file_name: input
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FormInput {
        FormInput {
            name: "Test User".into(),
            mobile: "9876543210".into(),
            problem: "leak".into(),
            file_name: None,
        }
    }

    #[test]
    fn accepts_complete_input() {
        let form = validate(&complete()).unwrap();
        assert_eq!(form.name, "Test User");
        assert_eq!(form.mobile, "9876543210");
        assert_eq!(form.problem, "leak");
    }

    #[test]
    fn missing_fields_win_in_order() {
        let mut input = FormInput::default();
        assert_eq!(
            validate(&input),
            Err(ValidationError::MissingField(Field::Name))
        );
        input.name = "A".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::MissingField(Field::Mobile))
        );
        input.mobile = "12".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::MissingField(Field::Problem))
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut input = complete();
        input.problem = "   ".into();
        assert_eq!(
            validate(&input),
            Err(ValidationError::MissingField(Field::Problem))
        );
    }

    #[test]
    fn mobile_must_have_ten_digits_after_stripping() {
        let mut input = complete();
        input.mobile = "98-76 54321".into(); // 9 digits
        assert_eq!(validate(&input), Err(ValidationError::InvalidMobileFormat));
        input.mobile = "98-76 543 210".into(); // separators stripped, 10 digits
        assert_eq!(validate(&input).unwrap().mobile, "9876543210");
        input.mobile = "98765432101".into(); // 11 digits
        assert_eq!(validate(&input), Err(ValidationError::InvalidMobileFormat));
    }

    #[test]
    fn values_are_trimmed_and_empty_file_dropped() {
        let mut input = complete();
        input.name = "  Test User  ".into();
        input.file_name = Some("  ".into());
        let form = validate(&input).unwrap();
        assert_eq!(form.name, "Test User");
        assert_eq!(form.file_name, None);
    }
}
