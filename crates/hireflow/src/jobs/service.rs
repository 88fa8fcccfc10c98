use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::forms::{ApplicationForm, FieldRegistry, ResolvedForm};

use super::domain::{
    slug_with_timestamp, CandidateId, CandidateRecord, Job, JobDraft, JobId, JobStatus, SalaryRange,
};
use super::repository::{
    CandidateQuery, CandidateRepository, JobQuery, JobRepository, RepositoryError, SortOrder,
};
use super::views::{CandidateView, JobStatusView, JobView};

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("app-{id:06}"))
}

/// Coordinates job postings and candidate intake over pluggable storage.
pub struct PortalService<J, C> {
    jobs: Arc<J>,
    candidates: Arc<C>,
    registry: FieldRegistry,
}

impl<J, C> PortalService<J, C>
where
    J: JobRepository,
    C: CandidateRepository,
{
    pub fn new(jobs: Arc<J>, candidates: Arc<C>) -> Self {
        Self {
            jobs,
            candidates,
            registry: FieldRegistry::new(),
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Stores a new posting. Absent statuses default to draft; salary
    /// bounds default to zero so drafts can be saved before numbers are
    /// settled. A schema document that does not parse is treated as no
    /// schema at all.
    pub fn create_job(&self, draft: JobDraft) -> Result<JobView, PortalServiceError> {
        if !draft.has_required_fields() {
            return Err(PortalServiceError::IncompleteDraft);
        }

        let status = match draft.status.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                JobStatus::parse(raw).ok_or(PortalServiceError::InvalidStatus)?
            }
            _ => JobStatus::Draft,
        };

        let application_form = draft
            .application_form
            .as_ref()
            .and_then(ApplicationForm::from_value);

        let currency = draft
            .currency
            .clone()
            .filter(|currency| !currency.trim().is_empty())
            .unwrap_or_else(|| "IDR".to_string());

        let now = Utc::now();
        let job = Job {
            id: next_job_id(),
            slug: slug_with_timestamp(&draft.title, now),
            title: draft.title,
            department: draft.department,
            description: draft.description,
            status,
            salary: SalaryRange {
                min: draft.salary_min.unwrap_or(0),
                max: draft.salary_max.unwrap_or(0),
                currency,
            },
            application_form,
            created_at: now,
        };

        let stored = self.jobs.insert(job)?;
        Ok(JobView::summary(&stored, 0))
    }

    pub fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobView>, PortalServiceError> {
        let jobs = self.jobs.list(query)?;
        let mut views = Vec::with_capacity(jobs.len());
        for job in &jobs {
            let applications = self.candidates.count_for_job(&job.id)?;
            views.push(JobView::summary(job, applications));
        }
        Ok(views)
    }

    pub fn get_job(&self, id: &JobId) -> Result<JobView, PortalServiceError> {
        let job = self
            .jobs
            .fetch(id)?
            .ok_or(PortalServiceError::JobNotFound)?;
        let applications = self.candidates.count_for_job(&job.id)?;
        Ok(JobView::detail(&job, applications))
    }

    /// Flips a posting's publication status.
    pub fn set_job_status(&self, id: &JobId, raw: &str) -> Result<JobStatusView, PortalServiceError> {
        if raw.trim().is_empty() {
            return Err(PortalServiceError::StatusRequired);
        }
        let status = JobStatus::parse(raw).ok_or(PortalServiceError::InvalidStatus)?;

        let mut job = self
            .jobs
            .fetch(id)?
            .ok_or(PortalServiceError::JobNotFound)?;
        job.status = status;
        self.jobs.update(job.clone())?;

        Ok(JobStatusView {
            id: job.id,
            status: status.label(),
        })
    }

    /// Accepts a submitted application document for an active job.
    ///
    /// The document is checked against the job's resolved form: every
    /// required field must be present and non-blank. Photo fields are
    /// exempt here because some clients upload the photo out of band.
    pub fn submit_application(
        &self,
        job_id: &JobId,
        form_data: Map<String, Value>,
    ) -> Result<CandidateRecord, PortalServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(PortalServiceError::JobNotFound)?;

        if !job.is_accepting_applications() {
            return Err(PortalServiceError::NotAcceptingApplications);
        }

        let resolved = ResolvedForm::resolve(&self.registry, job.application_form.as_ref());
        for field in resolved.fields() {
            if !field.required || is_photo_key(&field.key) {
                continue;
            }
            if is_blank_entry(form_data.get(&field.key)) {
                return Err(PortalServiceError::MissingField {
                    label: field.label.clone(),
                });
            }
        }

        let record = CandidateRecord {
            id: next_candidate_id(),
            job_id: job.id,
            form_data,
            applied_at: Utc::now(),
        };
        Ok(self.candidates.insert(record)?)
    }

    /// Lists a job's applications, newest first by default, flattened for
    /// the admin table. `search` matches any attribute value.
    pub fn list_candidates(
        &self,
        job_id: &JobId,
        query: &CandidateQuery,
    ) -> Result<Vec<CandidateView>, PortalServiceError> {
        self.jobs
            .fetch(job_id)?
            .ok_or(PortalServiceError::JobNotFound)?;

        let mut records = self.candidates.for_job(job_id)?;
        records.sort_by_key(|record| record.applied_at);
        if query.sort_order == SortOrder::Desc {
            records.reverse();
        }

        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        let views = records
            .iter()
            .map(CandidateView::from_record)
            .filter(|view| match needle.as_deref() {
                Some(needle) => view
                    .attributes
                    .iter()
                    .any(|attribute| attribute.value.to_lowercase().contains(needle)),
                None => true,
            })
            .skip(query.offset)
            .take(query.limit)
            .collect();

        Ok(views)
    }
}

fn is_blank_entry(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Recognizes the many spellings schemas use for the profile photo field.
fn is_photo_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    let underscored: String = lower
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let squashed: String = lower.split_whitespace().collect();

    const PHOTO_KEYS: &[&str] = &[
        "photo_profile",
        "photoprofile",
        "photo",
        "profile_photo",
        "profilephoto",
        "photo profile",
    ];

    PHOTO_KEYS
        .iter()
        .any(|candidate| lower == *candidate || underscored == *candidate || squashed == *candidate)
        || (lower.contains("photo") && lower.contains("profile"))
}

/// Why a portal operation was refused. The display strings are served to
/// clients verbatim.
#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error("Title, department, and description are required")]
    IncompleteDraft,
    #[error("Status is required")]
    StatusRequired,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Job not found")]
    JobNotFound,
    #[error("Job is not accepting applications")]
    NotAcceptingApplications,
    #[error("{label} is required")]
    MissingField { label: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
