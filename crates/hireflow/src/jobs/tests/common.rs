use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::jobs::domain::{CandidateId, CandidateRecord, Job, JobDraft, JobId};
use crate::jobs::repository::{
    apply_job_query, CandidateRepository, JobQuery, JobRepository, RepositoryError,
};
use crate::jobs::router::portal_router;
use crate::jobs::service::PortalService;

pub(super) fn application_schema() -> Value {
    json!({
        "fields": [
            { "key": "full_name", "validation": { "required": true } },
            { "key": "email", "type": "email", "validation": { "required": true } },
            { "key": "photo_profile", "type": "photo", "validation": { "required": true } },
            { "key": "domicile", "validation": { "required": false } },
        ]
    })
}

pub(super) fn engineering_draft() -> JobDraft {
    JobDraft {
        title: "Frontend Developer".to_string(),
        department: "Engineering".to_string(),
        description: "Build and polish the hiring portal's web interface".to_string(),
        status: Some("active".to_string()),
        salary_min: Some(7_000_000),
        salary_max: Some(8_000_000),
        currency: None,
        application_form: Some(application_schema()),
    }
}

pub(super) fn schemaless_draft() -> JobDraft {
    JobDraft {
        title: "Backend Developer".to_string(),
        department: "Engineering".to_string(),
        description: "Design and operate the portal's service layer".to_string(),
        status: Some("active".to_string()),
        salary_min: Some(9_000_000),
        salary_max: Some(12_000_000),
        currency: None,
        application_form: None,
    }
}

pub(super) fn submission() -> Map<String, Value> {
    let mut form = Map::new();
    form.insert("full_name".to_string(), json!("Nadia Putri"));
    form.insert("email".to_string(), json!("nadia.putri@example.com"));
    form.insert("domicile".to_string(), json!("Jakarta"));
    form
}

/// Covers every required field of the built-in form.
pub(super) fn fallback_submission() -> Map<String, Value> {
    let mut form = Map::new();
    form.insert("full_name".to_string(), json!("Ahmad Rizki"));
    form.insert("date_of_birth".to_string(), json!("1996-11-02"));
    form.insert("gender".to_string(), json!("Male"));
    form.insert("domicile".to_string(), json!("Bandung"));
    form.insert("phone_number".to_string(), json!("+628121234567"));
    form.insert("email".to_string(), json!("ahmad.rizki@example.com"));
    form.insert(
        "linkedin_link".to_string(),
        json!("https://linkedin.com/in/ahmadrizki"),
    );
    form
}

pub(super) fn candidate_record(
    id: &str,
    job_id: &JobId,
    name: &str,
    applied_at: DateTime<Utc>,
) -> CandidateRecord {
    let mut form = Map::new();
    form.insert("full_name".to_string(), json!(name));
    form.insert(
        "email".to_string(),
        json!(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
    );
    CandidateRecord {
        id: CandidateId(id.to_string()),
        job_id: job_id.clone(),
        form_data: form,
        applied_at,
    }
}

pub(super) fn build_service() -> (
    PortalService<MemoryJobRepository, MemoryCandidateRepository>,
    Arc<MemoryJobRepository>,
    Arc<MemoryCandidateRepository>,
) {
    let jobs = Arc::new(MemoryJobRepository::default());
    let candidates = Arc::new(MemoryCandidateRepository::default());
    let service = PortalService::new(jobs.clone(), candidates.clone());
    (service, jobs, candidates)
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobRepository {
    pub(super) records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for MemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(apply_job_query(guard.values().cloned().collect(), query))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCandidateRepository {
    records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl CandidateRepository for MemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }

    fn count_for_job(&self, job_id: &JobId) -> Result<usize, RepositoryError> {
        Ok(self.for_job(job_id)?.len())
    }
}

pub(super) struct ConflictCandidateRepository;

impl CandidateRepository for ConflictCandidateRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn count_for_job(&self, _job_id: &JobId) -> Result<usize, RepositoryError> {
        Ok(0)
    }
}

pub(super) struct UnavailableJobRepository;

impl JobRepository for UnavailableJobRepository {
    fn insert(&self, _job: Job) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _job: Job) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn portal_router_with_service(
    service: PortalService<MemoryJobRepository, MemoryCandidateRepository>,
) -> axum::Router {
    portal_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
