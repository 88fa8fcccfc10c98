use super::common::*;
use crate::forms::registry::{keys, FieldKind};
use crate::forms::resolver::FieldOrigin;
use crate::forms::schema::{ApplicationForm, FieldDescriptor};

#[test]
fn missing_schema_resolves_to_default_profile_set() {
    let form = resolved(None);

    assert_eq!(form.origin(), FieldOrigin::Fallback);
    assert_eq!(form.len(), 8);
    for key in [
        keys::FULL_NAME,
        keys::EMAIL,
        keys::PHONE_NUMBER,
        keys::DATE_OF_BIRTH,
        keys::DOMICILE,
        keys::GENDER,
        keys::LINKEDIN_LINK,
    ] {
        assert!(form.is_enabled(key), "{key} should be enabled");
        assert!(form.is_required(key), "{key} should be required");
    }
    assert!(form.is_enabled(keys::PHOTO_PROFILE));
    assert!(!form.is_required(keys::PHOTO_PROFILE));
}

#[test]
fn empty_schema_behaves_like_no_schema() {
    let schema = ApplicationForm::default();
    let form = resolved(Some(&schema));

    assert_eq!(form.origin(), FieldOrigin::Fallback);
    assert_eq!(form.len(), 8);
}

#[test]
fn fields_absent_from_schema_are_disabled() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::FULL_NAME).required(true),
        FieldDescriptor::new(keys::EMAIL).with_type("email").required(true),
    ]);
    let form = resolved(Some(&schema));

    assert_eq!(form.origin(), FieldOrigin::Schema);
    assert!(form.is_enabled(keys::FULL_NAME));
    assert!(!form.is_enabled(keys::GENDER));
    assert!(!form.is_enabled(keys::PHOTO_PROFILE));
    assert!(!form.is_required(keys::GENDER));
}

#[test]
fn descriptor_without_validation_is_disabled() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::FULL_NAME).required(true),
        FieldDescriptor::new(keys::DOMICILE),
    ]);
    let form = resolved(Some(&schema));

    assert!(!form.is_enabled(keys::DOMICILE));
    assert_eq!(form.len(), 1);
}

#[test]
fn optional_fields_are_enabled_but_not_required() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::LINKEDIN_LINK).with_type("url").required(false),
    ]);
    let form = resolved(Some(&schema));

    assert!(form.is_enabled(keys::LINKEDIN_LINK));
    assert!(!form.is_required(keys::LINKEDIN_LINK));
}

#[test]
fn duplicate_keys_keep_first_position_with_last_definition() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::FULL_NAME).required(false),
        FieldDescriptor::new(keys::EMAIL).with_type("email").required(true),
        FieldDescriptor::new(keys::FULL_NAME).with_label("Legal Name").required(true),
    ]);
    let form = resolved(Some(&schema));

    assert_eq!(form.len(), 2);
    assert_eq!(form.fields()[0].key, keys::FULL_NAME);
    assert_eq!(form.fields()[0].label, "Legal Name");
    assert!(form.fields()[0].required);
    assert_eq!(form.fields()[1].key, keys::EMAIL);
}

#[test]
fn later_duplicate_can_disable_a_field() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::GENDER).required(true),
        FieldDescriptor::new(keys::EMAIL).with_type("email").required(true),
        FieldDescriptor::new(keys::GENDER),
    ]);
    let form = resolved(Some(&schema));

    assert!(!form.is_enabled(keys::GENDER));
    assert_eq!(form.len(), 1);
}

#[test]
fn declared_type_wins_over_registry_kind() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::EMAIL).with_type("text").required(true),
        FieldDescriptor::new("portfolio_url").with_type("url").required(false),
        FieldDescriptor::new("nickname").required(false),
    ]);
    let form = resolved(Some(&schema));

    assert_eq!(form.field(keys::EMAIL).map(|field| field.kind), Some(FieldKind::Text));
    assert_eq!(
        form.field("portfolio_url").map(|field| field.kind),
        Some(FieldKind::Url)
    );
    assert_eq!(form.field("nickname").map(|field| field.kind), Some(FieldKind::Text));
}

#[test]
fn registry_kind_applies_when_type_is_omitted() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::EMAIL).required(true),
        FieldDescriptor::new(keys::PHONE_NUMBER).required(true),
    ]);
    let form = resolved(Some(&schema));

    assert_eq!(form.field(keys::EMAIL).map(|field| field.kind), Some(FieldKind::Email));
    assert_eq!(
        form.field(keys::PHONE_NUMBER).map(|field| field.kind),
        Some(FieldKind::Tel)
    );
}

#[test]
fn unknown_keys_get_humanized_labels() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new("expected_salary").required(false),
        FieldDescriptor::new(keys::EMAIL).with_type("email").required(true),
    ]);
    let form = resolved(Some(&schema));

    assert_eq!(
        form.field("expected_salary").map(|field| field.label.as_str()),
        Some("Expected Salary")
    );
    assert_eq!(
        form.field(keys::EMAIL).map(|field| field.label.as_str()),
        Some("Email")
    );
}

#[test]
fn disabled_fields_report_not_required() {
    let form = resolved(Some(&standard_schema()));
    assert!(!form.is_required("cover_letter"));
    assert!(form.field("cover_letter").is_none());
}
