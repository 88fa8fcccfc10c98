use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex_lite::Regex;
use thiserror::Error;

use super::registry::{keys, FieldKind};
use super::resolver::ResolvedForm;
use super::state::FormState;

/// Why a single field failed validation. The display strings double as the
/// inline messages shown next to the control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Missing { label: String },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid LinkedIn URL")]
    InvalidLinkedinUrl,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Invalid date")]
    InvalidDate,
}

/// Outcome of validating a whole form, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<String, FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, key: &str) -> Option<&FieldError> {
        self.errors.get(key)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(key, error)| (key.as_str(), error))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates one field against the resolved form.
///
/// Disabled fields always pass. Blank values only fail when the field is
/// required; format rules apply solely to non-blank input, so an optional
/// email field left empty is valid while a malformed one is not. The check
/// reads only its inputs, making it safe to run on every keystroke.
pub fn validate_field(form: &ResolvedForm, state: &FormState, key: &str) -> Option<FieldError> {
    let field = form.field(key)?;

    if field.kind == FieldKind::Photo {
        if field.required && state.photo().is_none() {
            return Some(FieldError::Missing {
                label: field.label.clone(),
            });
        }
        return None;
    }

    if state.is_blank(key) {
        if field.required {
            return Some(FieldError::Missing {
                label: field.label.clone(),
            });
        }
        return None;
    }

    let value = state.value(key).unwrap_or_default();
    match field.kind {
        FieldKind::Email => {
            if !email_pattern().is_match(value) {
                return Some(FieldError::InvalidEmail);
            }
        }
        FieldKind::Url => {
            if key == keys::LINKEDIN_LINK {
                if !linkedin_pattern().is_match(value.trim()) {
                    return Some(FieldError::InvalidLinkedinUrl);
                }
            } else if !is_web_url(value.trim()) {
                return Some(FieldError::InvalidUrl);
            }
        }
        FieldKind::Tel => {
            if !is_plausible_phone(value) {
                return Some(FieldError::InvalidPhone);
            }
        }
        FieldKind::Date => {
            if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
                return Some(FieldError::InvalidDate);
            }
        }
        FieldKind::Text | FieldKind::Select | FieldKind::Radio | FieldKind::Photo => {}
    }

    None
}

/// Validates every enabled field and collects the failures.
pub fn validate_form(form: &ResolvedForm, state: &FormState) -> ValidationReport {
    let errors = form
        .fields()
        .iter()
        .filter_map(|field| {
            validate_field(form, state, &field.key).map(|error| (field.key.clone(), error))
        })
        .collect();

    ValidationReport { errors }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn linkedin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://)?(www\.)?linkedin\.com/in/[\w-]+/?$")
            .expect("valid linkedin pattern")
    })
}

fn is_web_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// National numbers are digits only once whitespace is stripped, between
/// nine and thirteen digits long. The dial code travels separately.
fn is_plausible_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return false;
    }
    (9..=13).contains(&digits.len())
}
