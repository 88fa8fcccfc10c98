use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Canonical keys for the profile fields the portal collects.
pub mod keys {
    pub const FULL_NAME: &str = "full_name";
    pub const EMAIL: &str = "email";
    pub const PHONE_NUMBER: &str = "phone_number";
    pub const PHONE_COUNTRY_CODE: &str = "phone_country_code";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const DOMICILE: &str = "domicile";
    pub const GENDER: &str = "gender";
    pub const LINKEDIN_LINK: &str = "linkedin_link";
    pub const PHOTO_PROFILE: &str = "photo_profile";
}

/// Dial code applied when an applicant never picks one.
pub const DEFAULT_COUNTRY_CODE: &str = "+62";

/// Input behavior for a profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    Date,
    Select,
    Radio,
    Photo,
}

impl FieldKind {
    /// Maps a declared `type` string onto a kind. Unknown values fall back
    /// to plain text so a misspelled schema still renders something usable.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" | "phone" => Self::Tel,
            "url" => Self::Url,
            "date" => Self::Date,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "photo" | "file" => Self::Photo,
            _ => Self::Text,
        }
    }
}

/// Static description of one field the portal knows how to render.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Whether the field is mandatory when no schema says otherwise.
    pub fallback_required: bool,
    pub placeholder: Option<&'static str>,
    pub options: &'static [&'static str],
}

/// Selectable gender options, mirrored by the radio control.
pub static GENDER_OPTIONS: &[&str] = &["Female", "Male"];

/// Domicile choices offered by the dropdown.
pub static DOMICILE_OPTIONS: &[&str] = &[
    "Jakarta",
    "Bandung",
    "Surabaya",
    "Medan",
    "Semarang",
    "Makassar",
    "Palembang",
    "Tangerang",
    "Depok",
    "Bekasi",
    "Yogyakarta",
    "Malang",
    "Denpasar",
    "Bogor",
    "Batam",
    "Pekanbaru",
    "Bandar Lampung",
    "Padang",
    "Balikpapan",
    "Samarinda",
    "Pontianak",
    "Banjarmasin",
    "Manado",
    "Solo",
    "Cimahi",
];

/// International dialing prefix offered by the phone control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryCode {
    pub dial: &'static str,
    pub name: &'static str,
}

/// Dial codes offered alongside the phone input. Indonesia leads because it
/// is the default selection.
pub static COUNTRY_CODES: &[CountryCode] = &[
    CountryCode { dial: "+62", name: "Indonesia" },
    CountryCode { dial: "+60", name: "Malaysia" },
    CountryCode { dial: "+65", name: "Singapore" },
    CountryCode { dial: "+63", name: "Philippines" },
    CountryCode { dial: "+66", name: "Thailand" },
    CountryCode { dial: "+84", name: "Vietnam" },
    CountryCode { dial: "+91", name: "India" },
    CountryCode { dial: "+81", name: "Japan" },
    CountryCode { dial: "+82", name: "South Korea" },
    CountryCode { dial: "+86", name: "China" },
    CountryCode { dial: "+61", name: "Australia" },
    CountryCode { dial: "+44", name: "United Kingdom" },
    CountryCode { dial: "+1", name: "United States" },
];

/// Profile fields in the order the application form presents them when a
/// job carries no schema of its own.
static FIELD_CATALOG: &[FieldSpec] = &[
    FieldSpec {
        key: keys::PHOTO_PROFILE,
        label: "Photo Profile",
        kind: FieldKind::Photo,
        fallback_required: false,
        placeholder: None,
        options: &[],
    },
    FieldSpec {
        key: keys::FULL_NAME,
        label: "Full Name",
        kind: FieldKind::Text,
        fallback_required: true,
        placeholder: Some("Enter your full name"),
        options: &[],
    },
    FieldSpec {
        key: keys::DATE_OF_BIRTH,
        label: "Date of Birth",
        kind: FieldKind::Date,
        fallback_required: true,
        placeholder: Some("Select your date of birth"),
        options: &[],
    },
    FieldSpec {
        key: keys::GENDER,
        label: "Gender",
        kind: FieldKind::Radio,
        fallback_required: true,
        placeholder: None,
        options: GENDER_OPTIONS,
    },
    FieldSpec {
        key: keys::DOMICILE,
        label: "Domicile",
        kind: FieldKind::Select,
        fallback_required: true,
        placeholder: Some("Choose your domicile"),
        options: DOMICILE_OPTIONS,
    },
    FieldSpec {
        key: keys::PHONE_NUMBER,
        label: "Phone Number",
        kind: FieldKind::Tel,
        fallback_required: true,
        placeholder: Some("81XXXXXXXXX"),
        options: &[],
    },
    FieldSpec {
        key: keys::EMAIL,
        label: "Email",
        kind: FieldKind::Email,
        fallback_required: true,
        placeholder: Some("Enter your email address"),
        options: &[],
    },
    FieldSpec {
        key: keys::LINKEDIN_LINK,
        label: "LinkedIn Profile",
        kind: FieldKind::Url,
        fallback_required: true,
        placeholder: Some("https://linkedin.com/in/username"),
        options: &[],
    },
];

fn field_index() -> &'static HashMap<&'static str, &'static FieldSpec> {
    static INDEX: OnceLock<HashMap<&'static str, &'static FieldSpec>> = OnceLock::new();
    INDEX.get_or_init(|| {
        FIELD_CATALOG
            .iter()
            .map(|spec| (spec.key, spec))
            .collect()
    })
}

/// Lookup table for the profile fields the portal understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRegistry;

impl FieldRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Returns the static spec for a key, if the portal knows it.
    pub fn spec(&self, key: &str) -> Option<&'static FieldSpec> {
        field_index().get(key).copied()
    }

    /// The complete catalog in presentation order.
    pub fn fallback_fields(&self) -> &'static [FieldSpec] {
        FIELD_CATALOG
    }

    /// Display label for a key. Unknown keys are humanized from the key
    /// itself so schema authors can introduce new fields without code
    /// changes.
    pub fn default_label(&self, key: &str) -> String {
        match self.spec(key) {
            Some(spec) => spec.label.to_string(),
            None => humanize_key(key),
        }
    }

    /// Input kind for a key, defaulting to plain text for unknown keys.
    pub fn kind_for(&self, key: &str) -> FieldKind {
        self.spec(key).map(|spec| spec.kind).unwrap_or(FieldKind::Text)
    }
}

/// Turns a snake_case key into a display label: `full_name` -> `Full Name`.
pub fn humanize_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut start_of_word = true;
    for ch in key.chars() {
        if ch == '_' {
            label.push(' ');
            start_of_word = true;
        } else if start_of_word {
            label.extend(ch.to_uppercase());
            start_of_word = false;
        } else {
            label.push(ch);
        }
    }
    label
}
