use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-field validation switches carried by a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default)]
    pub required: bool,
}

/// One field entry inside a job's application form schema.
///
/// Only `key` is mandatory. A descriptor without a `validation` block marks
/// the field as disabled rather than enabled-but-optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            field_type: None,
            validation: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.validation = Some(FieldValidation { required });
        self
    }
}

/// The schema a job stores to customize its application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ApplicationForm {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lenient parse of a stored schema document.
    ///
    /// Accepts the flat `{"fields": [...]}` shape as well as the sectioned
    /// `{"sections": [{"fields": [...]}]}` shape, flattening the latter.
    /// Returns `None` when the document carries no usable field list, which
    /// callers treat the same as a job without a schema. Entries that are
    /// not objects or lack a string `key` are skipped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let fields: Vec<FieldDescriptor> = if let Some(list) = object.get("fields") {
            parse_descriptors(list.as_array()?)
        } else if let Some(sections) = object.get("sections").and_then(Value::as_array) {
            sections
                .iter()
                .filter_map(|section| section.get("fields").and_then(Value::as_array))
                .flat_map(|list| parse_descriptors(list))
                .collect()
        } else {
            return None;
        };

        Some(Self { fields })
    }
}

fn parse_descriptors(list: &[Value]) -> Vec<FieldDescriptor> {
    list.iter()
        .filter_map(|entry| serde_json::from_value::<FieldDescriptor>(entry.clone()).ok())
        .filter(|descriptor| !descriptor.key.trim().is_empty())
        .collect()
}
