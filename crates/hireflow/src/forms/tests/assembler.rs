use super::common::*;
use crate::forms::assembler::build_payload;
use crate::forms::registry::keys;
use crate::forms::schema::{ApplicationForm, FieldDescriptor};
use crate::forms::state::FormState;
use serde_json::Value;

#[test]
fn payload_contains_only_enabled_keys() {
    let schema = ApplicationForm::new(vec![
        FieldDescriptor::new(keys::FULL_NAME).required(true),
        FieldDescriptor::new(keys::EMAIL).with_type("email").required(true),
    ]);
    let form = resolved(Some(&schema));
    let state = filled_state();

    let payload = build_payload(&form, &state);
    assert_eq!(payload.get(keys::FULL_NAME), Some("Nadia Putri"));
    assert_eq!(payload.get(keys::EMAIL), Some("nadia.putri@example.com"));
    assert!(!payload.contains_key(keys::GENDER), "disabled keys must not leak");
    assert!(!payload.contains_key(keys::DOMICILE));
    assert_eq!(payload.len(), 2);
}

#[test]
fn phone_joins_dial_code_and_digits() {
    let form = resolved(None);
    let state = filled_state();

    let payload = build_payload(&form, &state);
    assert_eq!(payload.get(keys::PHONE_NUMBER), Some("+628121234567"));
    assert!(
        !payload.contains_key(keys::PHONE_COUNTRY_CODE),
        "the dial code is folded into the phone number"
    );
}

#[test]
fn phone_defaults_to_indonesia_when_no_code_selected() {
    let form = resolved(None);
    let mut state = FormState::new();
    state.set_value(keys::PHONE_NUMBER, "812 1234 567");

    let payload = build_payload(&form, &state);
    assert_eq!(payload.get(keys::PHONE_NUMBER), Some("+628121234567"));
}

#[test]
fn blank_phone_is_omitted_instead_of_shipping_a_bare_dial_code() {
    let form = resolved(None);
    let mut state = FormState::new();
    state.set_value(keys::PHONE_COUNTRY_CODE, "+65");
    state.set_value(keys::PHONE_NUMBER, "   ");

    let payload = build_payload(&form, &state);
    assert!(!payload.contains_key(keys::PHONE_NUMBER));
}

#[test]
fn photo_becomes_a_base64_data_uri() {
    let form = resolved(None);
    let mut state = filled_state();
    state.attach_photo(png_photo());

    let payload = build_payload(&form, &state);
    let uri = payload.get(keys::PHOTO_PROFILE).expect("photo present");
    assert_eq!(uri, "data:image/png;base64,iVBORw==");
}

#[test]
fn absent_photo_omits_the_key_entirely() {
    let form = resolved(None);
    let payload = build_payload(&form, &filled_state());
    assert!(!payload.contains_key(keys::PHOTO_PROFILE));
}

#[test]
fn text_values_pass_through_verbatim() {
    let form = resolved(None);
    let mut state = filled_state();
    state.set_value(keys::FULL_NAME, "  Nadia Putri ");

    let payload = build_payload(&form, &state);
    assert_eq!(payload.get(keys::FULL_NAME), Some("  Nadia Putri "));
}

#[test]
fn into_json_produces_a_flat_object() {
    let form = resolved(None);
    let payload = build_payload(&form, &filled_state());

    let object = payload.into_json();
    assert_eq!(
        object.get(keys::EMAIL),
        Some(&Value::String("nadia.putri@example.com".to_string()))
    );
    assert!(object.values().all(Value::is_string));
}
