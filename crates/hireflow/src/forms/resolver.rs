use std::collections::HashMap;

use super::registry::{FieldKind, FieldRegistry};
use super::schema::{ApplicationForm, FieldDescriptor};

/// Where a resolved form came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    /// The job supplied its own schema.
    Schema,
    /// No usable schema, so the registry's default profile set applies.
    Fallback,
}

/// One renderable field after schema resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// The effective form for a job: which fields exist, in what order, and
/// which of them are mandatory. Fields absent from this set are disabled
/// and must never be rendered, validated, or submitted.
#[derive(Debug, Clone)]
pub struct ResolvedForm {
    fields: Vec<ResolvedField>,
    index: HashMap<String, usize>,
    origin: FieldOrigin,
}

impl ResolvedForm {
    /// Resolves a job's schema into the concrete field set.
    ///
    /// A missing schema and a schema with an empty field list both fall
    /// back to the registry defaults. Duplicate keys keep the position of
    /// their first occurrence but take every other property from the last
    /// occurrence, so a later entry can flip requiredness or disable the
    /// field entirely.
    pub fn resolve(registry: &FieldRegistry, schema: Option<&ApplicationForm>) -> Self {
        match schema {
            Some(form) if !form.is_empty() => Self::from_schema(registry, form),
            _ => Self::fallback(registry),
        }
    }

    fn fallback(registry: &FieldRegistry) -> Self {
        let fields: Vec<ResolvedField> = registry
            .fallback_fields()
            .iter()
            .map(|spec| ResolvedField {
                key: spec.key.to_string(),
                label: spec.label.to_string(),
                kind: spec.kind,
                required: spec.fallback_required,
            })
            .collect();

        Self::build(fields, FieldOrigin::Fallback)
    }

    fn from_schema(registry: &FieldRegistry, form: &ApplicationForm) -> Self {
        let mut order: Vec<&str> = Vec::with_capacity(form.fields.len());
        let mut latest: HashMap<&str, &FieldDescriptor> = HashMap::with_capacity(form.fields.len());

        for descriptor in &form.fields {
            let key = descriptor.key.as_str();
            if !latest.contains_key(key) {
                order.push(key);
            }
            latest.insert(key, descriptor);
        }

        let fields: Vec<ResolvedField> = order
            .into_iter()
            .filter_map(|key| {
                let descriptor = latest[key];
                let validation = descriptor.validation?;
                Some(ResolvedField {
                    key: descriptor.key.clone(),
                    label: descriptor
                        .label
                        .clone()
                        .unwrap_or_else(|| registry.default_label(key)),
                    kind: match descriptor.field_type.as_deref() {
                        Some(declared) => FieldKind::parse(declared),
                        None => registry.kind_for(key),
                    },
                    required: validation.required,
                })
            })
            .collect();

        Self::build(fields, FieldOrigin::Schema)
    }

    fn build(fields: Vec<ResolvedField>, origin: FieldOrigin) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.key.clone(), position))
            .collect();

        Self {
            fields,
            index,
            origin,
        }
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&ResolvedField> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    /// A field is enabled only when it survived resolution.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Disabled fields are never required.
    pub fn is_required(&self, key: &str) -> bool {
        self.field(key).map(|field| field.required).unwrap_or(false)
    }

    pub fn origin(&self) -> FieldOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
