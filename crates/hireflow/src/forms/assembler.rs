use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::{Map, Value};

use super::registry::{keys, FieldKind, DEFAULT_COUNTRY_CODE};
use super::resolver::ResolvedForm;
use super::state::{FormState, PhotoAttachment};

/// The flat document submitted to the candidates endpoint.
///
/// Contains entries for enabled fields only; disabled fields can never
/// leak into it regardless of what the state holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload(BTreeMap<String, String>);

impl SubmissionPayload {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object form, ready to be posted as a request body.
    pub fn into_json(self) -> Map<String, Value> {
        self.0
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect()
    }
}

/// Assembles the submission document from the resolved form and the
/// applicant's state.
///
/// Phone fields are joined with the selected dial code (falling back to
/// the default) and stripped of whitespace; a phone with no digits is
/// omitted entirely so a bare dial code never ships. Photos are inlined
/// as base64 data URIs and omitted when nothing was uploaded. The country
/// code picker is consumed here and never becomes a payload key of its
/// own. Every other field passes through verbatim.
pub fn build_payload(form: &ResolvedForm, state: &FormState) -> SubmissionPayload {
    let mut entries = BTreeMap::new();

    for field in form.fields() {
        if field.key == keys::PHONE_COUNTRY_CODE {
            continue;
        }
        match field.kind {
            FieldKind::Photo => {
                if let Some(photo) = state.photo() {
                    entries.insert(field.key.clone(), photo_data_uri(photo));
                }
            }
            FieldKind::Tel => {
                let raw: String = state
                    .value(&field.key)
                    .unwrap_or_default()
                    .chars()
                    .filter(|ch| !ch.is_whitespace())
                    .collect();
                if raw.is_empty() {
                    continue;
                }

                let code = match state.value(keys::PHONE_COUNTRY_CODE) {
                    Some(code) if !code.trim().is_empty() => code.trim().to_string(),
                    _ => DEFAULT_COUNTRY_CODE.to_string(),
                };
                entries.insert(field.key.clone(), format!("{code}{raw}"));
            }
            _ => {
                if let Some(value) = state.value(&field.key) {
                    entries.insert(field.key.clone(), value.to_string());
                }
            }
        }
    }

    SubmissionPayload(entries)
}

fn photo_data_uri(photo: &PhotoAttachment) -> String {
    format!(
        "data:{};base64,{}",
        photo.content_type,
        STANDARD.encode(&photo.bytes)
    )
}
