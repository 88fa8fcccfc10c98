use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::forms::humanize_key;
use crate::forms::ApplicationForm;

use super::domain::{CandidateId, CandidateRecord, Job, JobId};

/// Salary block of the job card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryRangeView {
    pub min: u64,
    pub max: u64,
    pub currency: String,
    pub display_text: String,
}

/// Presentation strings for the admin job card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCardView {
    pub badge: &'static str,
    pub started_on_text: String,
    pub cta: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplicationCount {
    pub applications: usize,
}

/// A job posting as the admin endpoints serve it. The schema rides along
/// on detail responses only.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: JobId,
    pub slug: String,
    pub title: String,
    pub department: String,
    pub description: String,
    pub status: &'static str,
    pub salary_range: SalaryRangeView,
    pub list_card: ListCardView,
    #[serde(rename = "_count")]
    pub count: ApplicationCount,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_form: Option<ApplicationForm>,
}

impl JobView {
    pub fn summary(job: &Job, applications: usize) -> Self {
        Self::build(job, applications, None)
    }

    pub fn detail(job: &Job, applications: usize) -> Self {
        Self::build(job, applications, job.application_form.clone())
    }

    fn build(job: &Job, applications: usize, application_form: Option<ApplicationForm>) -> Self {
        Self {
            id: job.id.clone(),
            slug: job.slug.clone(),
            title: job.title.clone(),
            department: job.department.clone(),
            description: job.description.clone(),
            status: job.status.label(),
            salary_range: SalaryRangeView {
                min: job.salary.min,
                max: job.salary.max,
                currency: job.salary.currency.clone(),
                display_text: job.salary.display_text(),
            },
            list_card: ListCardView {
                badge: job.status.badge(),
                started_on_text: format!("started on {}", job.created_at.format("%-d %b %Y")),
                cta: "Manage Job",
            },
            count: ApplicationCount { applications },
            created_at: job.created_at,
            application_form,
        }
    }
}

/// Minimal acknowledgement for a status change.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusView {
    pub id: JobId,
    pub status: &'static str,
}

/// One displayable entry of a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAttribute {
    pub key: String,
    pub label: String,
    pub value: String,
    pub order: usize,
}

/// A submitted application flattened for the admin candidate table.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub attributes: Vec<CandidateAttribute>,
}

impl CandidateView {
    /// Flattens the stored form document into labeled attributes.
    ///
    /// Blank and empty entries are dropped. The canonical profile fields
    /// sort first in a fixed order; any other keys follow after them.
    /// `order` is reassigned to be contiguous after sorting.
    pub fn from_record(record: &CandidateRecord) -> Self {
        let mut attributes: Vec<CandidateAttribute> = record
            .form_data
            .iter()
            .filter_map(|(key, value)| {
                attribute_text(value).map(|text| CandidateAttribute {
                    key: key.clone(),
                    label: humanize_key(key),
                    value: text,
                    order: 0,
                })
            })
            .collect();

        attributes.sort_by_key(|attribute| canonical_rank(&attribute.key));
        for (position, attribute) in attributes.iter_mut().enumerate() {
            attribute.order = position + 1;
        }

        Self {
            id: record.id.clone(),
            attributes,
        }
    }
}

/// Fixed ordering for the canonical profile fields; unknown keys sort
/// after all of them.
fn canonical_rank(key: &str) -> usize {
    match key {
        "full_name" => 1,
        "email" => 2,
        "phone_number" => 3,
        "domicile" => 4,
        "gender" => 5,
        "linkedin_link" => 6,
        "date_of_birth" => 7,
        _ => 999,
    }
}

/// Display text for one stored value. `None` means the entry is dropped:
/// nulls, blank strings, zeros, and `false` all count as empty.
fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(number) => {
            if number.as_f64() == Some(0.0) {
                None
            } else {
                Some(number.to_string())
            }
        }
        Value::String(text) => {
            if text.trim().is_empty() {
                None
            } else {
                Some(text.clone())
            }
        }
        other => serde_json::to_string(other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::domain::{JobStatus, SalaryRange};
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_job() -> Job {
        Job {
            id: JobId("job-000001".to_string()),
            slug: "frontend-developer-abc123".to_string(),
            title: "Frontend Developer".to_string(),
            department: "Engineering".to_string(),
            description: "Build delightful interfaces".to_string(),
            status: JobStatus::Active,
            salary: SalaryRange::idr(7_000_000, 8_000_000),
            application_form: Some(ApplicationForm::default()),
            created_at: Utc.with_ymd_and_hms(2025, 10, 1, 8, 30, 0).single().expect("valid date"),
        }
    }

    fn sample_record(form_data: serde_json::Map<String, Value>) -> CandidateRecord {
        CandidateRecord {
            id: CandidateId("app-000001".to_string()),
            job_id: JobId("job-000001".to_string()),
            form_data,
            applied_at: Utc.with_ymd_and_hms(2025, 10, 8, 10, 30, 0).single().expect("valid date"),
        }
    }

    #[test]
    fn job_card_strings_follow_the_posting() {
        let view = JobView::summary(&sample_job(), 3);
        assert_eq!(view.status, "active");
        assert_eq!(view.list_card.badge, "Active");
        assert_eq!(view.list_card.started_on_text, "started on 1 Oct 2025");
        assert_eq!(view.list_card.cta, "Manage Job");
        assert_eq!(view.salary_range.display_text, "Rp7.000.000 - Rp8.000.000");
        assert_eq!(view.count.applications, 3);
        assert!(view.application_form.is_none(), "summaries omit the schema");
    }

    #[test]
    fn detail_view_carries_the_schema() {
        let view = JobView::detail(&sample_job(), 0);
        assert!(view.application_form.is_some());

        let serialized = serde_json::to_value(&view).expect("serializes");
        assert!(serialized.get("createdAt").is_some());
        assert!(serialized.get("_count").is_some());
    }

    #[test]
    fn candidate_attributes_follow_canonical_order() {
        let form_data = json!({
            "linkedin_link": "https://linkedin.com/in/nadiaputri",
            "full_name": "Nadia Putri",
            "expected_salary": "9000000",
            "email": "nadia.putri@example.com"
        });
        let record = sample_record(form_data.as_object().expect("object").clone());

        let view = CandidateView::from_record(&record);
        let keys: Vec<&str> = view.attributes.iter().map(|attribute| attribute.key.as_str()).collect();
        assert_eq!(keys, vec!["full_name", "email", "linkedin_link", "expected_salary"]);
        let orders: Vec<usize> = view.attributes.iter().map(|attribute| attribute.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let form_data = json!({
            "full_name": "Nadia Putri",
            "domicile": "   ",
            "gender": null,
            "notice_period_days": 0,
            "relocation": false,
            "remote_ok": true
        });
        let record = sample_record(form_data.as_object().expect("object").clone());

        let view = CandidateView::from_record(&record);
        let keys: Vec<&str> = view.attributes.iter().map(|attribute| attribute.key.as_str()).collect();
        assert_eq!(keys, vec!["full_name", "remote_ok"]);
        assert_eq!(view.attributes[1].value, "true");
    }

    #[test]
    fn labels_are_humanized_from_keys() {
        let form_data = json!({ "expected_salary": "9000000" });
        let record = sample_record(form_data.as_object().expect("object").clone());

        let view = CandidateView::from_record(&record);
        assert_eq!(view.attributes[0].label, "Expected Salary");
    }
}
