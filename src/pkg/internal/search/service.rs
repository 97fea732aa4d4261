use crate::pkg::internal::adaptors::jobs::spec::NewJob;
use crate::pkg::internal::adaptors::tags::spec::TagCategory;
use crate::pkg::internal::search::filter::{JobFilter, SearchParams};
use crate::pkg::internal::search::format::{JobResponse, SearchResponse};
use crate::pkg::internal::search::pagination::PageRequest;
use crate::pkg::internal::store::JobStore;
use crate::prelude::{AppError, Result};

pub async fn search_jobs(store: &dyn JobStore, params: &SearchParams) -> Result<SearchResponse> {
    let filter = JobFilter::from_params(params)?;
    let request = PageRequest::new(params.page, params.limit);
    let page = store.search(&filter, request.window()).await?;
    tracing::debug!(
        clauses = filter.clauses().len(),
        tag_join = filter.requires_tag_join(),
        total = page.total,
        "jobs searched"
    );
    Ok(SearchResponse {
        items: page.jobs.into_iter().map(JobResponse::from).collect(),
        total: page.total,
        page: request.page,
        limit: request.limit,
        pages: request.total_pages(page.total),
    })
}

pub async fn get_job(store: &dyn JobStore, job_id: &str) -> Result<JobResponse> {
    store
        .job_by_external_id(job_id)
        .await?
        .map(JobResponse::from)
        .ok_or_else(|| AppError::NotFound(job_id.to_string()))
}

/// Snapshot keys must name known categories; unknown tag names are fine and
/// simply produce no association.
pub async fn create_job(store: &dyn JobStore, job: &NewJob) -> Result<JobResponse> {
    for category in job.tags.keys() {
        category.parse::<TagCategory>()?;
    }
    if job.job_id.trim().is_empty() {
        return Err(AppError::Validation("job_id must not be empty".into()));
    }
    let created = store.create_job(job).await?;
    tracing::info!(job_id = %created.job.job_id, tags = created.tags.len(), "job created");
    Ok(created.into())
}
