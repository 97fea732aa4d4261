use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::pkg::internal::adaptors::job_tags::mutators::JobTagMutator;
use crate::pkg::internal::adaptors::job_tags::selectors::JobTagSelector;
use crate::pkg::internal::adaptors::job_tags::spec::JobTagEntry;
use crate::pkg::internal::adaptors::jobs::mutators::JobMutator;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::{JobWithTags, NewJob};
use crate::pkg::internal::adaptors::tags::mutators::TagMutator;
use crate::pkg::internal::adaptors::tags::selectors::TagSelector;
use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::pkg::internal::search::filter::JobFilter;
use crate::pkg::internal::search::pagination::PageWindow;
use crate::pkg::internal::store::{JobStore, SearchPage, attach_tags, resolve_snapshot};
use crate::pkg::server::state::GetTxn;
use crate::prelude::Result;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn search(&self, filter: &JobFilter, window: PageWindow) -> Result<SearchPage> {
        let mut tx = self.pool.begin_read_txn().await?;
        let total = JobSelector::new(&mut tx).count_matching(filter).await?;
        let jobs = if total == 0 || window.limit == 0 {
            Vec::new()
        } else {
            JobSelector::new(&mut tx).find_matching(filter, window).await?
        };
        let pks: Vec<i32> = jobs.iter().map(|j| j.id).collect();
        let pairs = JobTagSelector::new(&mut tx).tags_for_jobs(&pks).await?;
        tx.commit().await?;
        tracing::debug!(total, returned = jobs.len(), "search read complete");
        Ok(SearchPage {
            total,
            jobs: attach_tags(jobs, pairs),
        })
    }

    async fn job_by_external_id(&self, job_id: &str) -> Result<Option<JobWithTags>> {
        let mut tx = self.pool.begin_read_txn().await?;
        let job = match JobSelector::new(&mut tx).get_by_job_id(job_id).await? {
            Some(job) => job,
            None => return Ok(None),
        };
        let pairs = JobTagSelector::new(&mut tx).tags_for_jobs(&[job.id]).await?;
        tx.commit().await?;
        Ok(attach_tags(vec![job], pairs).pop())
    }

    async fn tags_by_category(&self, category: TagCategory) -> Result<Vec<TagEntry>> {
        let mut tx = self.pool.begin_read_txn().await?;
        let tags = TagSelector::new(&mut tx).get_by_category(category).await?;
        tx.commit().await?;
        Ok(tags)
    }

    async fn create_tag(
        &self,
        name: &str,
        category: TagCategory,
        description: Option<&str>,
    ) -> Result<TagEntry> {
        let mut tx = self.pool.begin_txn().await?;
        let tag = TagMutator::new(&mut tx)
            .create(name, category, description)
            .await?;
        tx.commit().await?;
        Ok(tag)
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobWithTags> {
        let mut tx = self.pool.begin_txn().await?;
        let entry = JobMutator::new(&mut tx).create(job).await?;
        let catalog = TagSelector::new(&mut tx).get_all().await?;
        let tags = resolve_snapshot(&job.job_id, &job.tags, &catalog);
        for tag in &tags {
            JobTagMutator::new(&mut tx).create(entry.id, tag.id).await?;
        }
        tx.commit().await?;
        tracing::debug!(job_id = %entry.job_id, linked = tags.len(), "job created");
        Ok(JobWithTags { job: entry, tags })
    }

    async fn link_tag(&self, job_pk: i32, tag_pk: i32) -> Result<JobTagEntry> {
        let mut tx = self.pool.begin_txn().await?;
        let link = JobTagMutator::new(&mut tx).create(job_pk, tag_pk).await?;
        tx.commit().await?;
        Ok(link)
    }

    async fn clear(&self) -> Result<()> {
        let mut tx = self.pool.begin_txn().await?;
        let links = JobTagMutator::new(&mut tx).delete_all().await?;
        let jobs = JobMutator::new(&mut tx).delete_all().await?;
        let tags = TagMutator::new(&mut tx).delete_all().await?;
        tx.commit().await?;
        tracing::info!(links, jobs, tags, "cleared existing data");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&*self.pool).await?;
        Ok(())
    }
}
