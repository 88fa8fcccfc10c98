use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::domain::{JobDraft, JobId, JobStatus};
use super::repository::{
    CandidateQuery, CandidateRepository, JobQuery, JobRepository, JobSortKey, RepositoryError,
    SortOrder,
};
use super::service::{PortalService, PortalServiceError};

/// Router builder exposing the admin and candidate HTTP endpoints.
pub fn portal_router<J, C>(service: Arc<PortalService<J, C>>) -> Router
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler::<J, C>).post(create_job_handler::<J, C>),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(get_job_handler::<J, C>).patch(set_status_handler::<J, C>),
        )
        .route(
            "/api/v1/jobs/:job_id/candidates",
            get(list_candidates_handler::<J, C>).post(submit_candidate_handler::<J, C>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ListJobsParams {
    pub(crate) status: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) limit: Option<usize>,
    pub(crate) offset: Option<usize>,
    pub(crate) sort_by: Option<String>,
    pub(crate) sort_order: Option<String>,
}

impl ListJobsParams {
    fn into_query(self) -> JobQuery {
        let defaults = JobQuery::default();
        JobQuery {
            status: self.status.as_deref().and_then(JobStatus::parse),
            search: self.search,
            limit: self.limit.unwrap_or(defaults.limit),
            offset: self.offset.unwrap_or(defaults.offset),
            sort_by: self.sort_by.as_deref().map(JobSortKey::parse).unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ListCandidatesParams {
    pub(crate) search: Option<String>,
    pub(crate) limit: Option<usize>,
    pub(crate) offset: Option<usize>,
    pub(crate) sort_order: Option<String>,
}

impl ListCandidatesParams {
    fn into_query(self) -> CandidateQuery {
        let defaults = CandidateQuery::default();
        CandidateQuery {
            search: self.search,
            limit: self.limit.unwrap_or(defaults.limit),
            offset: self.offset.unwrap_or(defaults.offset),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

pub(crate) async fn list_jobs_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    Query(params): Query<ListJobsParams>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    match service.list_jobs(&params.into_query()) {
        Ok(views) => (StatusCode::OK, axum::Json(list_body(views))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn create_job_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    match service.create_job(draft) {
        Ok(view) => (StatusCode::CREATED, axum::Json(success_body(view))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn get_job_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    match service.get_job(&JobId(job_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(success_body(view))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn set_status_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    Path(job_id): Path<String>,
    axum::Json(body): axum::Json<StatusUpdateRequest>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    let status = body.status.unwrap_or_default();
    match service.set_job_status(&JobId(job_id), &status) {
        Ok(view) => (StatusCode::OK, axum::Json(success_body(view))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn list_candidates_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    Path(job_id): Path<String>,
    Query(params): Query<ListCandidatesParams>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    match service.list_candidates(&JobId(job_id), &params.into_query()) {
        Ok(views) => (StatusCode::OK, axum::Json(success_body(views))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn submit_candidate_handler<J, C>(
    State(service): State<Arc<PortalService<J, C>>>,
    Path(job_id): Path<String>,
    axum::Json(form_data): axum::Json<Map<String, Value>>,
) -> Response
where
    J: JobRepository + 'static,
    C: CandidateRepository + 'static,
{
    match service.submit_application(&JobId(job_id), form_data) {
        Ok(record) => {
            let payload = json!({
                "success": true,
                "message": "Your application has been submitted successfully!",
                "application_id": record.id,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

fn success_body(data: impl Serialize) -> Value {
    json!({
        "success": true,
        "data": data,
    })
}

/// Listing responses additionally carry a server timestamp.
fn list_body(data: impl Serialize) -> Value {
    json!({
        "success": true,
        "data": data,
        "timestamp": Utc::now(),
    })
}

fn error_body(status: StatusCode, message: &str) -> Value {
    json!({
        "success": false,
        "error": {
            "message": message,
            "code": status.as_u16(),
        },
        "timestamp": Utc::now(),
    })
}

fn error_response(error: &PortalServiceError) -> Response {
    let (status, message) = match error {
        PortalServiceError::JobNotFound => (StatusCode::NOT_FOUND, error.to_string()),
        PortalServiceError::IncompleteDraft
        | PortalServiceError::StatusRequired
        | PortalServiceError::InvalidStatus
        | PortalServiceError::NotAcceptingApplications
        | PortalServiceError::MissingField { .. } => (StatusCode::BAD_REQUEST, error.to_string()),
        PortalServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "Duplicate entry found".to_string())
        }
        PortalServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "Record not found".to_string())
        }
        PortalServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    };

    (status, axum::Json(error_body(status, &message))).into_response()
}
