use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use hireflow::jobs::{
    apply_job_query, CandidateId, CandidateRecord, CandidateRepository, Job, JobDraft, JobId,
    JobQuery, JobRepository, JobView, PortalService, PortalServiceError, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for InMemoryJobRepository {
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
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<HashMap<CandidateId, CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.job_id == job_id)
            .count())
    }
}

/// Loads the demo postings and their sample applicants. Returns the created
/// postings, frontend first.
pub(crate) fn seed_demo_portal<J, C>(
    service: &PortalService<J, C>,
) -> Result<Vec<JobView>, PortalServiceError>
where
    J: JobRepository,
    C: CandidateRepository,
{
    let frontend = service.create_job(JobDraft {
        title: "Frontend Developer".to_string(),
        department: "Engineering".to_string(),
        description: "We are looking for a skilled Frontend Developer to join our team and help build amazing user experiences.".to_string(),
        status: Some("active".to_string()),
        salary_min: Some(7_000_000),
        salary_max: Some(8_000_000),
        currency: None,
        application_form: Some(frontend_application_schema()),
    })?;

    let backend = service.create_job(JobDraft {
        title: "Backend Developer".to_string(),
        department: "Engineering".to_string(),
        description: "Join our backend team to build scalable and robust server-side applications.".to_string(),
        status: Some("active".to_string()),
        salary_min: Some(8_000_000),
        salary_max: Some(10_000_000),
        currency: None,
        application_form: Some(backend_application_schema()),
    })?;

    service.submit_application(
        &frontend.id,
        sample_candidate(
            "Nadia Putri",
            "nadia.putri@example.com",
            "+62 812-1234-5678",
            "Jakarta",
            "Female",
            "https://linkedin.com/in/nadiaputri",
        ),
    )?;
    service.submit_application(
        &frontend.id,
        sample_candidate(
            "Ahmad Rizki",
            "ahmad.rizki@example.com",
            "+62 813-5678-9012",
            "Bandung",
            "Male",
            "https://linkedin.com/in/ahmadrizki",
        ),
    )?;

    Ok(vec![frontend, backend])
}

fn frontend_application_schema() -> Value {
    json!({
        "sections": [
            {
                "title": "Minimum Profile Information Required",
                "fields": [
                    { "key": "full_name", "label": "Full Name", "validation": { "required": true } },
                    { "key": "photo_profile", "label": "Profile Picture", "validation": { "required": true } },
                    { "key": "gender", "label": "Gender", "validation": { "required": true } },
                    { "key": "domicile", "label": "Domicile", "validation": { "required": false } },
                    { "key": "email", "label": "Email", "type": "email", "validation": { "required": true } },
                    { "key": "phone_number", "label": "Phone Number", "type": "tel", "validation": { "required": true } },
                    { "key": "linkedin_link", "label": "LinkedIn Profile", "type": "url", "validation": { "required": true } },
                    { "key": "date_of_birth", "label": "Date of Birth", "type": "date", "validation": { "required": false } }
                ]
            }
        ]
    })
}

fn backend_application_schema() -> Value {
    json!({
        "sections": [
            {
                "title": "Minimum Profile Information Required",
                "fields": [
                    { "key": "full_name", "label": "Full Name", "validation": { "required": true } },
                    { "key": "email", "label": "Email", "type": "email", "validation": { "required": true } },
                    { "key": "phone_number", "label": "Phone Number", "type": "tel", "validation": { "required": true } },
                    { "key": "linkedin_link", "label": "LinkedIn Profile", "type": "url", "validation": { "required": false } }
                ]
            }
        ]
    })
}

fn sample_candidate(
    full_name: &str,
    email: &str,
    phone_number: &str,
    domicile: &str,
    gender: &str,
    linkedin_link: &str,
) -> Map<String, Value> {
    let mut form = Map::new();
    form.insert("full_name".to_string(), json!(full_name));
    form.insert("email".to_string(), json!(email));
    form.insert("phone_number".to_string(), json!(phone_number));
    form.insert("domicile".to_string(), json!(domicile));
    form.insert("gender".to_string(), json!(gender));
    form.insert("linkedin_link".to_string(), json!(linkedin_link));
    form
}
