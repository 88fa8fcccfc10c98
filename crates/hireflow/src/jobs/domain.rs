use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::forms::ApplicationForm;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Publication state of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Active,
    Inactive,
}

impl JobStatus {
    /// Parses a submitted status, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Lowercase wire form.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
        }
    }

    /// Badge text shown on the admin job card.
    pub fn badge(&self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Draft => "Draft",
            JobStatus::Inactive => "Inactive",
        }
    }
}

/// Advertised salary band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

impl SalaryRange {
    pub fn idr(min: u64, max: u64) -> Self {
        Self {
            min,
            max,
            currency: "IDR".to_string(),
        }
    }

    /// Display form with Indonesian thousands grouping, for example
    /// `Rp7.000.000 - Rp8.000.000`.
    pub fn display_text(&self) -> String {
        format!(
            "Rp{} - Rp{}",
            group_thousands(self.min),
            group_thousands(self.max)
        )
    }
}

/// A job posting as stored by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub slug: String,
    pub title: String,
    pub department: String,
    pub description: String,
    pub status: JobStatus,
    pub salary: SalaryRange,
    pub application_form: Option<ApplicationForm>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Only active jobs take submissions.
    pub fn is_accepting_applications(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Unvalidated input for creating a job posting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub application_form: Option<Value>,
}

impl JobDraft {
    /// The minimum the intake endpoint insists on before storing anything.
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.department.trim().is_empty()
            && !self.description.trim().is_empty()
    }

    /// Field-level authoring checks, keyed by input name. Matches what the
    /// admin form surfaces inline while the posting is being written.
    pub fn validate(&self) -> BTreeMap<&'static str, String> {
        let mut errors = BTreeMap::new();

        if self.title.trim().is_empty() {
            errors.insert("title", "Job title is required".to_string());
        }

        if self.description.trim().is_empty() || self.description.chars().count() < 10 {
            errors.insert(
                "description",
                "Description must be at least 10 characters".to_string(),
            );
        }

        if self.department.trim().is_empty() {
            errors.insert("department", "Department is required".to_string());
        }

        if self.salary_min.unwrap_or(0) == 0 {
            errors.insert("salary_min", "Minimum salary must be positive".to_string());
        }

        if self.salary_max.unwrap_or(0) == 0 {
            errors.insert("salary_max", "Maximum salary must be positive".to_string());
        }

        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if max < min {
                errors.insert(
                    "salary_max",
                    "Maximum salary must be greater than minimum salary".to_string(),
                );
            }
        }

        errors
    }
}

/// A stored application for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub job_id: JobId,
    /// The submitted form document, exactly as assembled by the applicant's
    /// session.
    pub form_data: Map<String, Value>,
    pub applied_at: DateTime<Utc>,
}

/// URL-safe slug from a title: lowercase, alphanumeric runs joined by
/// single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug plus a base36 creation timestamp, keeping slugs unique across
/// postings that share a title.
pub fn slug_with_timestamp(title: &str, at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0) as u64;
    format!("{}-{}", slugify(title), to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (position, ch) in digits.chars().enumerate() {
        if position != 0 && position % 3 == offset {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}
