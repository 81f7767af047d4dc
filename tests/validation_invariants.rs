//! Validation Invariant Tests
//!
//! - `name` and `portfolio` are required and bounded on create
//! - updates re-check only the fields they carry
//! - every violation in a payload is reported
//! - lengths count characters, not bytes

use executive_registry::schema::{
    ExecutiveFields, ExecutiveValidator, Title, ViolationKind, NAME_MAX_LEN,
};
use serde_json::{json, Value};

fn fields(value: Value) -> ExecutiveFields {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_minimal_record_is_valid() {
    let new = ExecutiveValidator::new()
        .validate_new(fields(json!({"name": "Ama", "portfolio": "Health"})))
        .unwrap();
    assert_eq!(new.name, "Ama");
    assert_eq!(new.title, None);
}

#[test]
fn test_length_bounds_are_inclusive() {
    let validator = ExecutiveValidator::new();
    let at_limit = "a".repeat(NAME_MAX_LEN);

    assert!(validator
        .validate_new(fields(json!({"name": at_limit, "portfolio": "p".repeat(100)})))
        .is_ok());

    let err = validator
        .validate_new(fields(json!({"name": "a".repeat(51), "portfolio": "p".repeat(101)})))
        .unwrap_err();
    assert!(err.has("name", ViolationKind::TooLong));
    assert!(err.has("portfolio", ViolationKind::TooLong));
}

#[test]
fn test_multibyte_names_count_characters() {
    let name = "é".repeat(NAME_MAX_LEN);
    assert!(name.len() > NAME_MAX_LEN);

    assert!(ExecutiveValidator::new()
        .validate_new(fields(json!({"name": name, "portfolio": "Culture"})))
        .is_ok());
}

#[test]
fn test_every_title_is_accepted() {
    let validator = ExecutiveValidator::new();
    for title in Title::ALL {
        let new = validator
            .validate_new(fields(json!({
                "title": title.as_str(),
                "name": "A",
                "portfolio": "B"
            })))
            .unwrap();
        assert_eq!(new.title, Some(title));
    }
}

#[test]
fn test_patch_checks_only_present_fields() {
    let validator = ExecutiveValidator::new();

    let patch = validator
        .validate_patch(fields(json!({"contact": "0244"})))
        .unwrap();
    assert_eq!(patch.name, None);
    assert_eq!(patch.contact, Some(Some("0244".to_string())));

    let err = validator
        .validate_patch(fields(json!({"name": null, "email": "nope"})))
        .unwrap_err();
    assert!(err.has("name", ViolationKind::Required));
    assert!(err.has("email", ViolationKind::PatternMismatch));
    assert_eq!(err.message(), "Please add a name, Please use a valid email");
}

#[test]
fn test_validation_is_deterministic() {
    let validator = ExecutiveValidator::new();
    let payload = json!({"title": "Sir", "name": "", "contact": "1".repeat(21)});

    let first = validator.validate_new(fields(payload.clone())).unwrap_err();
    for _ in 0..10 {
        let again = validator.validate_new(fields(payload.clone())).unwrap_err();
        assert_eq!(again.message(), first.message());
    }
}
