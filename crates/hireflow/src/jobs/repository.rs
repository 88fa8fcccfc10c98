use super::domain::{CandidateRecord, Job, JobId, JobStatus};

/// Which column a job listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSortKey {
    #[default]
    CreatedAt,
    Title,
}

impl JobSortKey {
    /// Maps a `sortBy` query value; unknown values keep the default.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            _ => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

/// Filtering and paging for the jobs listing.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub sort_by: JobSortKey,
    pub sort_order: SortOrder,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: 100,
            offset: 0,
            sort_by: JobSortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Paging and search for a job's candidate listing.
#[derive(Debug, Clone)]
pub struct CandidateQuery {
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub sort_order: SortOrder,
}

impl Default for CandidateQuery {
    fn default() -> Self {
        Self {
            search: None,
            limit: 10,
            offset: 0,
            sort_order: SortOrder::default(),
        }
    }
}

/// Storage abstraction for job postings so the service can be exercised
/// against fakes.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update(&self, job: Job) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn list(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError>;
}

/// Storage abstraction for submitted applications.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn for_job(&self, job_id: &JobId) -> Result<Vec<CandidateRecord>, RepositoryError>;
    fn count_for_job(&self, job_id: &JobId) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Applies a [`JobQuery`] to an in-memory snapshot: filter, sort, then
/// page. Shared by the in-memory implementations so every backend agrees
/// on listing semantics.
pub fn apply_job_query(mut jobs: Vec<Job>, query: &JobQuery) -> Vec<Job> {
    if let Some(status) = query.status {
        jobs.retain(|job| job.status == status);
    }

    if let Some(search) = query.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            jobs.retain(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job.department.to_lowercase().contains(&needle)
                    || job.description.to_lowercase().contains(&needle)
            });
        }
    }

    match query.sort_by {
        JobSortKey::CreatedAt => jobs.sort_by_key(|job| job.created_at),
        JobSortKey::Title => jobs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
    }
    if query.sort_order == SortOrder::Desc {
        jobs.reverse();
    }

    jobs.into_iter().skip(query.offset).take(query.limit).collect()
}
