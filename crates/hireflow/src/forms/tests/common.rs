use crate::forms::registry::{keys, FieldRegistry};
use crate::forms::resolver::ResolvedForm;
use crate::forms::schema::{ApplicationForm, FieldDescriptor};
use crate::forms::state::{FormState, PhotoAttachment};

pub(super) fn registry() -> FieldRegistry {
    FieldRegistry::new()
}

/// Schema with every profile field enabled: the canonical seven required
/// plus an optional photo, mirroring what the authoring tool emits.
pub(super) fn standard_schema() -> ApplicationForm {
    ApplicationForm::new(vec![
        FieldDescriptor::new(keys::PHOTO_PROFILE).with_label("Photo Profile").required(false),
        FieldDescriptor::new(keys::FULL_NAME).with_label("Full Name").required(true),
        FieldDescriptor::new(keys::DATE_OF_BIRTH)
            .with_label("Date of Birth")
            .with_type("date")
            .required(true),
        FieldDescriptor::new(keys::GENDER).with_label("Gender").required(true),
        FieldDescriptor::new(keys::DOMICILE).with_label("Domicile").required(true),
        FieldDescriptor::new(keys::PHONE_NUMBER)
            .with_label("Phone Number")
            .with_type("tel")
            .required(true),
        FieldDescriptor::new(keys::EMAIL)
            .with_label("Email")
            .with_type("email")
            .required(true),
        FieldDescriptor::new(keys::LINKEDIN_LINK)
            .with_label("LinkedIn Profile")
            .with_type("url")
            .required(true),
    ])
}

pub(super) fn resolved(schema: Option<&ApplicationForm>) -> ResolvedForm {
    ResolvedForm::resolve(&registry(), schema)
}

/// State that satisfies every rule of the standard schema.
pub(super) fn filled_state() -> FormState {
    let mut state = FormState::new();
    state.set_value(keys::FULL_NAME, "Nadia Putri");
    state.set_value(keys::DATE_OF_BIRTH, "1998-04-17");
    state.set_value(keys::GENDER, "Female");
    state.set_value(keys::DOMICILE, "Jakarta");
    state.set_value(keys::PHONE_COUNTRY_CODE, "+62");
    state.set_value(keys::PHONE_NUMBER, "8121234567");
    state.set_value(keys::EMAIL, "nadia.putri@example.com");
    state.set_value(keys::LINKEDIN_LINK, "https://linkedin.com/in/nadiaputri");
    state
}

pub(super) fn png_photo() -> PhotoAttachment {
    PhotoAttachment::new("profile.png", mime::IMAGE_PNG, vec![0x89, 0x50, 0x4e, 0x47])
}
