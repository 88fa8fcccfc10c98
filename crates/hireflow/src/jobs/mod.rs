//! Job postings and candidate intake.
//!
//! The admin side authors postings (`domain`, `service`) and reads them
//! back through the view layer (`views`). The candidate side submits
//! assembled form documents against an active posting. Storage sits
//! behind the `repository` traits so the HTTP layer in `router` stays
//! backend-agnostic.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    slug_with_timestamp, slugify, CandidateId, CandidateRecord, Job, JobDraft, JobId, JobStatus,
    SalaryRange,
};
pub use repository::{
    apply_job_query, CandidateQuery, CandidateRepository, JobQuery, JobRepository, JobSortKey,
    RepositoryError, SortOrder,
};
pub use router::portal_router;
pub use service::{PortalService, PortalServiceError};
pub use views::{CandidateAttribute, CandidateView, JobStatusView, JobView};
