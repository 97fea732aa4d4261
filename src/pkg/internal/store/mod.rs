//! Storage seam for the search service.
//!
//! Every call is one request-scoped unit of work: the Postgres store opens a
//! transaction per call and releases it before returning, the in-memory store
//! takes its lock per call. Nothing is cached between calls.

pub mod memory;
pub mod postgres;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::pkg::internal::adaptors::job_tags::spec::JobTagEntry;
use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobWithTags, NewJob, TagSnapshot};
use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::pkg::internal::search::filter::JobFilter;
use crate::pkg::internal::search::pagination::PageWindow;
use crate::prelude::Result;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Total match count plus the requested slice of matching jobs.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub total: i64,
    pub jobs: Vec<JobWithTags>,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Count and page the jobs matching `filter` from one consistent read.
    async fn search(&self, filter: &JobFilter, window: PageWindow) -> Result<SearchPage>;

    async fn job_by_external_id(&self, job_id: &str) -> Result<Option<JobWithTags>>;

    async fn tags_by_category(&self, category: TagCategory) -> Result<Vec<TagEntry>>;

    async fn create_tag(
        &self,
        name: &str,
        category: TagCategory,
        description: Option<&str>,
    ) -> Result<TagEntry>;

    /// Insert the job and link every snapshot tag present in the catalog.
    async fn create_job(&self, job: &NewJob) -> Result<JobWithTags>;

    async fn link_tag(&self, job_pk: i32, tag_pk: i32) -> Result<JobTagEntry>;

    /// Remove associations, jobs and tags.
    async fn clear(&self) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}

/// Catalog tags named by a snapshot, in snapshot order, each at most once.
pub(crate) fn resolve_snapshot(job_id: &str, snapshot: &TagSnapshot, catalog: &[TagEntry]) -> Vec<TagEntry> {
    let by_key: HashMap<(&str, &str), &TagEntry> = catalog
        .iter()
        .map(|t| ((t.category.as_str(), t.name.as_str()), t))
        .collect();
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for (category, names) in snapshot {
        for name in names {
            match by_key.get(&(category.as_str(), name.as_str())) {
                Some(tag) => {
                    if seen.insert(tag.id) {
                        resolved.push((*tag).clone());
                    }
                }
                None => {
                    tracing::warn!(job_id, %category, %name, "tag not in catalog, skipping association");
                }
            }
        }
    }
    resolved
}

/// Attach `(job pk, tag)` pairs to their jobs, keeping pair order per job.
pub(crate) fn attach_tags(jobs: Vec<JobEntry>, pairs: Vec<(i32, TagEntry)>) -> Vec<JobWithTags> {
    let mut by_job: HashMap<i32, Vec<TagEntry>> = HashMap::new();
    for (job_pk, tag) in pairs {
        by_job.entry(job_pk).or_default().push(tag);
    }
    jobs.into_iter()
        .map(|job| {
            let tags = by_job.remove(&job.id).unwrap_or_default();
            JobWithTags { job, tags }
        })
        .collect()
}
