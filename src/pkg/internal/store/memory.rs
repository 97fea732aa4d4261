use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sqlx::types::Json;

use crate::pkg::internal::adaptors::job_tags::spec::JobTagEntry;
use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobWithTags, NewJob};
use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::pkg::internal::search::filter::JobFilter;
use crate::pkg::internal::search::pagination::PageWindow;
use crate::pkg::internal::store::{JobStore, SearchPage, resolve_snapshot};
use crate::prelude::{AppError, Result};

#[derive(Default)]
struct Tables {
    jobs: Vec<JobEntry>,
    tags: Vec<TagEntry>,
    job_tags: Vec<JobTagEntry>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn tags_of(&self, job_pk: i32) -> Vec<TagEntry> {
        self.job_tags
            .iter()
            .filter(|jt| jt.job_id == job_pk)
            .filter_map(|jt| self.tags.iter().find(|t| t.id == jt.tag_id))
            .cloned()
            .collect()
    }

    fn search(&self, filter: &JobFilter, window: PageWindow) -> SearchPage {
        let mut matched: Vec<(&JobEntry, Vec<TagEntry>)> = self
            .jobs
            .iter()
            .map(|job| (job, self.tags_of(job.id)))
            .filter(|(job, tags)| filter.matches(job, tags))
            .collect();
        matched.sort_by(|(a, _), (b, _)| {
            b.job_posting_date
                .cmp(&a.job_posting_date)
                .then(a.id.cmp(&b.id))
        });
        let total = matched.len() as i64;
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        let jobs = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(job, tags)| JobWithTags {
                job: job.clone(),
                tags,
            })
            .collect();
        SearchPage { total, jobs }
    }

    fn insert_tag(&mut self, name: &str, category: TagCategory, description: Option<&str>) -> Result<TagEntry> {
        if self.tags.iter().any(|t| t.name == name && t.category == category) {
            return Err(AppError::Duplicate(format!("tag ({}, {})", name, category)));
        }
        let tag = TagEntry {
            id: self.next_id(),
            name: name.to_string(),
            category,
            description: description.map(str::to_string),
        };
        self.tags.push(tag.clone());
        Ok(tag)
    }

    fn insert_link(&mut self, job_pk: i32, tag_pk: i32) -> Result<JobTagEntry> {
        if !self.jobs.iter().any(|j| j.id == job_pk) || !self.tags.iter().any(|t| t.id == tag_pk) {
            return Err(AppError::Validation(format!(
                "job {} or tag {} does not exist",
                job_pk, tag_pk
            )));
        }
        if self.job_tags.iter().any(|jt| jt.job_id == job_pk && jt.tag_id == tag_pk) {
            return Err(AppError::Duplicate(format!("job tag ({}, {})", job_pk, tag_pk)));
        }
        let link = JobTagEntry {
            id: self.next_id(),
            job_id: job_pk,
            tag_id: tag_pk,
            created_at: Utc::now(),
        };
        self.job_tags.push(link.clone());
        Ok(link)
    }

    fn insert_job(&mut self, job: &NewJob) -> Result<JobWithTags> {
        if self.jobs.iter().any(|j| j.job_id == job.job_id) {
            return Err(AppError::Duplicate(format!("job {}", job.job_id)));
        }
        let now = Utc::now();
        let entry = JobEntry {
            id: self.next_id(),
            job_id: job.job_id.clone(),
            job_position: job.job_position.clone(),
            job_link: job.job_link.clone(),
            company_name: job.company_name.clone(),
            company_profile: job.company_profile.clone(),
            job_location: job.job_location.clone(),
            job_posting_date: job.job_posting_date,
            tags: Json(job.tags.clone()),
            created_at: now,
            updated_at: now,
        };
        let tags = resolve_snapshot(&job.job_id, &job.tags, &self.tags);
        self.jobs.push(entry.clone());
        for tag in &tags {
            self.insert_link(entry.id, tag.id)?;
        }
        Ok(JobWithTags { job: entry, tags })
    }
}

/// Lock-guarded tables with the same uniqueness rules as the SQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_count(&self) -> usize {
        self.tables.read().jobs.len()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn search(&self, filter: &JobFilter, window: PageWindow) -> Result<SearchPage> {
        Ok(self.tables.read().search(filter, window))
    }

    async fn job_by_external_id(&self, job_id: &str) -> Result<Option<JobWithTags>> {
        let tables = self.tables.read();
        Ok(tables
            .jobs
            .iter()
            .find(|j| j.job_id == job_id)
            .map(|job| JobWithTags {
                job: job.clone(),
                tags: tables.tags_of(job.id),
            }))
    }

    async fn tags_by_category(&self, category: TagCategory) -> Result<Vec<TagEntry>> {
        Ok(self
            .tables
            .read()
            .tags
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect())
    }

    async fn create_tag(
        &self,
        name: &str,
        category: TagCategory,
        description: Option<&str>,
    ) -> Result<TagEntry> {
        self.tables.write().insert_tag(name, category, description)
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobWithTags> {
        self.tables.write().insert_job(job)
    }

    async fn link_tag(&self, job_pk: i32, tag_pk: i32) -> Result<JobTagEntry> {
        self.tables.write().insert_link(job_pk, tag_pk)
    }

    async fn clear(&self) -> Result<()> {
        *self.tables.write() = Tables::default();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
