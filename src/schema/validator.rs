//! Executive validator
//!
//! Enforces the data-model rules on client payloads:
//! - `name` required, at most 50 characters
//! - `portfolio` required, at most 100 characters
//! - `title` one of the fixed honorifics
//! - `email` matches the email pattern
//! - `contact` at most 20 characters
//!
//! Lengths count characters, not bytes. The validator never touches storage.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{FieldViolation, ValidationError, ValidationResult, ViolationKind};
use super::types::{ExecutiveFields, ExecutivePatch, NewExecutive, Title};

pub const NAME_MAX_LEN: usize = 50;
pub const PORTFOLIO_MAX_LEN: usize = 100;
pub const CONTACT_MAX_LEN: usize = 20;

const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Validates create and update payloads.
///
/// Stateless; every violation in a payload is reported, not just the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutiveValidator;

impl ExecutiveValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a create payload. `name` and `portfolio` must be present.
    pub fn validate_new(&self, fields: ExecutiveFields) -> ValidationResult<NewExecutive> {
        let mut violations = Vec::new();

        let title = check_title(fields.title.flatten(), &mut violations);
        let name = check_required(
            "name",
            fields.name.flatten(),
            NAME_MAX_LEN,
            &mut violations,
        );
        let portfolio = check_required(
            "portfolio",
            fields.portfolio.flatten(),
            PORTFOLIO_MAX_LEN,
            &mut violations,
        );
        let email = check_email(fields.email.flatten(), &mut violations);
        let contact = check_contact(fields.contact.flatten(), &mut violations);

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(NewExecutive {
            title,
            // Both are Some when no violation was recorded.
            name: name.unwrap_or_default(),
            portfolio: portfolio.unwrap_or_default(),
            email,
            contact,
        })
    }

    /// Validate an update payload. Only fields present in the payload are
    /// checked; an explicit `null` on a required field is a violation.
    pub fn validate_patch(&self, fields: ExecutiveFields) -> ValidationResult<ExecutivePatch> {
        let mut violations = Vec::new();
        let mut patch = ExecutivePatch::default();

        if let Some(title) = fields.title {
            patch.title = Some(check_title(title, &mut violations));
        }
        if let Some(name) = fields.name {
            patch.name = check_required("name", name, NAME_MAX_LEN, &mut violations);
        }
        if let Some(portfolio) = fields.portfolio {
            patch.portfolio =
                check_required("portfolio", portfolio, PORTFOLIO_MAX_LEN, &mut violations);
        }
        if let Some(email) = fields.email {
            patch.email = Some(check_email(email, &mut violations));
        }
        if let Some(contact) = fields.contact {
            patch.contact = Some(check_contact(contact, &mut violations));
        }

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(patch)
    }
}

fn required_message(field: &str) -> String {
    format!("Please add a {}", field)
}

fn too_long_message(field: &'static str, max: usize) -> String {
    match field {
        "contact" => format!("Contact can not be longer than {} characters", max),
        _ => format!("{} can not be more than {} characters", capitalize(field), max),
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_required(
    field: &'static str,
    value: Option<String>,
    max: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => {
            if v.chars().count() > max {
                violations.push(FieldViolation::new(
                    field,
                    ViolationKind::TooLong,
                    too_long_message(field, max),
                ));
                None
            } else {
                Some(v)
            }
        }
        _ => {
            violations.push(FieldViolation::new(
                field,
                ViolationKind::Required,
                required_message(field),
            ));
            None
        }
    }
}

fn check_title(value: Option<String>, violations: &mut Vec<FieldViolation>) -> Option<Title> {
    let value = value?;
    match value.parse::<Title>() {
        Ok(title) => Some(title),
        Err(()) => {
            violations.push(FieldViolation::new(
                "title",
                ViolationKind::NotInEnum,
                format!("`{}` is not a valid enum value for path `title`", value),
            ));
            None
        }
    }
}

fn check_email(value: Option<String>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    let value = value?;
    // An empty string is treated as "no email", matching the pattern check's
    // behaviour on unset values.
    if !value.is_empty() && !is_valid_email(&value) {
        violations.push(FieldViolation::new(
            "email",
            ViolationKind::PatternMismatch,
            "Please use a valid email",
        ));
        return None;
    }
    Some(value)
}

fn check_contact(value: Option<String>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    let value = value?;
    if value.chars().count() > CONTACT_MAX_LEN {
        violations.push(FieldViolation::new(
            "contact",
            ViolationKind::TooLong,
            too_long_message("contact", CONTACT_MAX_LEN),
        ));
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: Option<&str>, portfolio: Option<&str>) -> ExecutiveFields {
        ExecutiveFields {
            name: name.map(|n| Some(n.to_string())),
            portfolio: portfolio.map(|p| Some(p.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_minimal_record() {
        let new = ExecutiveValidator::new()
            .validate_new(fields(Some("Ama"), Some("Health")))
            .unwrap();
        assert_eq!(new.name, "Ama");
        assert_eq!(new.portfolio, "Health");
        assert_eq!(new.title, None);
    }

    #[test]
    fn test_missing_required_fields_reported_together() {
        let err = ExecutiveValidator::new()
            .validate_new(ExecutiveFields::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please add a name, Please add a portfolio");
    }

    #[test]
    fn test_empty_name_counts_as_missing() {
        let err = ExecutiveValidator::new()
            .validate_new(fields(Some(""), Some("Health")))
            .unwrap_err();
        assert!(err.has("name", ViolationKind::Required));
    }

    #[test]
    fn test_length_limits_are_inclusive() {
        let validator = ExecutiveValidator::new();
        let name = "n".repeat(NAME_MAX_LEN);
        let portfolio = "p".repeat(PORTFOLIO_MAX_LEN);
        assert!(validator
            .validate_new(fields(Some(&name), Some(&portfolio)))
            .is_ok());

        let long_name = "n".repeat(NAME_MAX_LEN + 1);
        let long_portfolio = "p".repeat(PORTFOLIO_MAX_LEN + 1);
        let err = validator
            .validate_new(fields(Some(&long_name), Some(&long_portfolio)))
            .unwrap_err();
        assert!(err.has("name", ViolationKind::TooLong));
        assert!(err.has("portfolio", ViolationKind::TooLong));
        assert_eq!(
            err.to_string(),
            "Name can not be more than 50 characters, Portfolio can not be more than 100 characters"
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        // 50 two-byte characters is within the limit
        let name = "é".repeat(NAME_MAX_LEN);
        assert!(ExecutiveValidator::new()
            .validate_new(fields(Some(&name), Some("Culture")))
            .is_ok());
    }

    #[test]
    fn test_title_must_be_known() {
        let mut input = fields(Some("Ama"), Some("Health"));
        input.title = Some(Some("Chief".to_string()));
        let err = ExecutiveValidator::new().validate_new(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`Chief` is not a valid enum value for path `title`"
        );

        let mut input = fields(Some("Ama"), Some("Health"));
        input.title = Some(Some("Honourable".to_string()));
        let new = ExecutiveValidator::new().validate_new(input).unwrap();
        assert_eq!(new.title, Some(Title::Honourable));
    }

    #[test]
    fn test_email_pattern() {
        let validator = ExecutiveValidator::new();
        for good in ["ama@gov.gh", "first.last@mail.example.org", "x@[10.0.0.1]"] {
            let mut input = fields(Some("Ama"), Some("Health"));
            input.email = Some(Some(good.to_string()));
            assert!(validator.validate_new(input).is_ok(), "{good}");
        }
        for bad in ["ama", "ama@", "ama@gov", "a b@gov.gh"] {
            let mut input = fields(Some("Ama"), Some("Health"));
            input.email = Some(Some(bad.to_string()));
            let err = validator.validate_new(input).unwrap_err();
            assert!(err.has("email", ViolationKind::PatternMismatch), "{bad}");
        }
    }

    #[test]
    fn test_contact_limit() {
        let mut input = fields(Some("Ama"), Some("Health"));
        input.contact = Some(Some("0".repeat(CONTACT_MAX_LEN + 1)));
        let err = ExecutiveValidator::new().validate_new(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Contact can not be longer than 20 characters"
        );
    }

    #[test]
    fn test_patch_only_checks_present_fields() {
        let patch = ExecutiveValidator::new()
            .validate_patch(fields(None, Some("Trade")))
            .unwrap();
        assert_eq!(patch.portfolio, Some("Trade".to_string()));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_patch_rejects_null_required_field() {
        let input = ExecutiveFields {
            name: Some(None),
            ..Default::default()
        };
        let err = ExecutiveValidator::new().validate_patch(input).unwrap_err();
        assert!(err.has("name", ViolationKind::Required));
    }

    #[test]
    fn test_patch_null_clears_optional_field() {
        let input = ExecutiveFields {
            email: Some(None),
            ..Default::default()
        };
        let patch = ExecutiveValidator::new().validate_patch(input).unwrap();
        assert_eq!(patch.email, Some(None));
    }

    #[test]
    fn test_patch_enforces_length() {
        let long = "n".repeat(NAME_MAX_LEN + 1);
        let err = ExecutiveValidator::new()
            .validate_patch(fields(Some(&long), None))
            .unwrap_err();
        assert!(err.has("name", ViolationKind::TooLong));
    }
}
