use serde::Serialize;

use super::registry::{CountryCode, FieldKind, FieldRegistry, COUNTRY_CODES, DEFAULT_COUNTRY_CODE};
use super::resolver::ResolvedForm;

/// A concrete widget the client renders for one resolved field.
///
/// Each variant carries everything the client needs so it never has to
/// consult the registry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FormControl {
    Text {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Email {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Phone {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        country_codes: Vec<CountryCode>,
        default_country_code: String,
    },
    Url {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Date {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Select {
        key: String,
        label: String,
        required: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        options: Vec<String>,
    },
    Radio {
        key: String,
        label: String,
        required: bool,
        options: Vec<String>,
    },
    Photo {
        key: String,
        label: String,
        required: bool,
    },
}

impl FormControl {
    pub fn key(&self) -> &str {
        match self {
            FormControl::Text { key, .. }
            | FormControl::Email { key, .. }
            | FormControl::Phone { key, .. }
            | FormControl::Url { key, .. }
            | FormControl::Date { key, .. }
            | FormControl::Select { key, .. }
            | FormControl::Radio { key, .. }
            | FormControl::Photo { key, .. } => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormControl::Text { label, .. }
            | FormControl::Email { label, .. }
            | FormControl::Phone { label, .. }
            | FormControl::Url { label, .. }
            | FormControl::Date { label, .. }
            | FormControl::Select { label, .. }
            | FormControl::Radio { label, .. }
            | FormControl::Photo { label, .. } => label,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            FormControl::Text { required, .. }
            | FormControl::Email { required, .. }
            | FormControl::Phone { required, .. }
            | FormControl::Url { required, .. }
            | FormControl::Date { required, .. }
            | FormControl::Select { required, .. }
            | FormControl::Radio { required, .. }
            | FormControl::Photo { required, .. } => *required,
        }
    }
}

/// Builds the widget list for a resolved form, preserving field order.
pub fn render_controls(registry: &FieldRegistry, form: &ResolvedForm) -> Vec<FormControl> {
    form.fields()
        .iter()
        .map(|field| {
            let key = field.key.clone();
            let label = field.label.clone();
            let required = field.required;
            let placeholder = registry
                .spec(&field.key)
                .and_then(|spec| spec.placeholder)
                .map(str::to_string);
            let options = || -> Vec<String> {
                registry
                    .spec(&field.key)
                    .map(|spec| spec.options.iter().map(|&option| option.to_string()).collect())
                    .unwrap_or_default()
            };

            match field.kind {
                FieldKind::Text => FormControl::Text {
                    key,
                    label,
                    required,
                    placeholder,
                },
                FieldKind::Email => FormControl::Email {
                    key,
                    label,
                    required,
                    placeholder,
                },
                FieldKind::Tel => FormControl::Phone {
                    key,
                    label,
                    required,
                    placeholder,
                    country_codes: COUNTRY_CODES.to_vec(),
                    default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
                },
                FieldKind::Url => FormControl::Url {
                    key,
                    label,
                    required,
                    placeholder,
                },
                FieldKind::Date => FormControl::Date {
                    key,
                    label,
                    required,
                    placeholder,
                },
                FieldKind::Select => FormControl::Select {
                    key,
                    label,
                    required,
                    placeholder,
                    options: options(),
                },
                FieldKind::Radio => FormControl::Radio {
                    key,
                    label,
                    required,
                    options: options(),
                },
                FieldKind::Photo => FormControl::Photo {
                    key,
                    label,
                    required,
                },
            }
        })
        .collect()
}
