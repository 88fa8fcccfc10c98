use std::collections::{BTreeMap, BTreeSet};

/// An uploaded profile photo held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

impl PhotoAttachment {
    pub fn new(file_name: impl Into<String>, content_type: mime::Mime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }
}

/// Everything an applicant has entered so far.
///
/// Values are stored verbatim, untrimmed. Blankness checks happen at
/// validation time so the applicant's own input is never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
    photo: Option<PhotoAttachment>,
    touched: BTreeSet<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.touched.insert(key.clone());
        self.values.insert(key, value.into());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn attach_photo(&mut self, photo: PhotoAttachment) {
        self.touched.insert(super::registry::keys::PHOTO_PROFILE.to_string());
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    pub fn photo(&self) -> Option<&PhotoAttachment> {
        self.photo.as_ref()
    }

    /// Marks a field as visited without changing its value, so required
    /// errors can surface once the applicant moves past it.
    pub fn touch(&mut self, key: impl Into<String>) {
        self.touched.insert(key.into());
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    /// True when the field holds no value or only whitespace.
    pub fn is_blank(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(value) => value.trim().is_empty(),
            None => true,
        }
    }
}
