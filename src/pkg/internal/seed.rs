//! Bulk import of the tag catalog and job records from JSON documents.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::pkg::internal::adaptors::jobs::spec::NewJob;
use crate::pkg::internal::adaptors::tags::spec::TagCategory;
use crate::pkg::internal::search::service;
use crate::pkg::internal::store::JobStore;
use crate::prelude::{AppError, Result};

/// `{"tags": {"<category>": ["<name>", ...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagDocument {
    pub tags: BTreeMap<String, Vec<String>>,
}

/// `{"jobs": [<job record>, ...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDocument {
    pub jobs: Vec<NewJob>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub tags_created: usize,
    pub tags_existing: usize,
    pub jobs_created: usize,
    pub jobs_existing: usize,
}

pub async fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load tags first, then jobs through the create-job path. Rows that already
/// exist are counted and skipped, so re-running without `reset` is harmless.
pub async fn import(
    store: &dyn JobStore,
    tags: &TagDocument,
    jobs: &JobDocument,
    reset: bool,
) -> Result<ImportSummary> {
    if reset {
        store.clear().await?;
    }

    let mut summary = ImportSummary::default();
    for (category, names) in &tags.tags {
        let category: TagCategory = category.parse()?;
        let mut seen = Vec::with_capacity(names.len());
        for name in names {
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            match store.create_tag(name, category, None).await {
                Ok(_) => summary.tags_created += 1,
                Err(AppError::Duplicate(_)) => summary.tags_existing += 1,
                Err(err) => return Err(err),
            }
        }
    }

    for job in &jobs.jobs {
        match service::create_job(store, job).await {
            Ok(_) => summary.jobs_created += 1,
            Err(AppError::Duplicate(_)) => {
                tracing::warn!(job_id = %job.job_id, "job already present, skipping");
                summary.jobs_existing += 1;
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        tags_created = summary.tags_created,
        tags_existing = summary.tags_existing,
        jobs_created = summary.jobs_created,
        jobs_existing = summary.jobs_existing,
        "import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::search::filter::JobFilter;
    use crate::pkg::internal::search::pagination::PageWindow;
    use crate::pkg::internal::store::MemoryStore;
    use serde_json::json;

    fn documents() -> (TagDocument, JobDocument) {
        let tags = serde_json::from_value(json!({
            "tags": {
                "technology": ["python", "django", "python"],
                "skill": ["backend"],
                "role": ["backend"]
            }
        }))
        .unwrap();
        let jobs = serde_json::from_value(json!({
            "jobs": [{
                "job_id": "JOB001",
                "job_position": "Senior Python Developer",
                "job_link": "https://example.com/jobs/job001",
                "company_name": "TechCorp",
                "job_location": "San Francisco, CA",
                "job_posting_date": "2025-05-20",
                "tags": {"technology": ["python", "flask"], "skill": ["backend"]}
            }]
        }))
        .unwrap();
        (tags, jobs)
    }

    #[tokio::test]
    async fn test_import_creates_tags_and_links_known_ones() {
        let store = MemoryStore::new();
        let (tags, jobs) = documents();
        let summary = import(&store, &tags, &jobs, false).await.unwrap();
        assert_eq!(summary.tags_created, 4);
        assert_eq!(summary.jobs_created, 1);

        let job = store.job_by_external_id("JOB001").await.unwrap().unwrap();
        let names: Vec<&str> = job.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["backend", "python"]);
    }

    #[tokio::test]
    async fn test_reimport_skips_existing_rows() {
        let store = MemoryStore::new();
        let (tags, jobs) = documents();
        import(&store, &tags, &jobs, false).await.unwrap();
        let summary = import(&store, &tags, &jobs, false).await.unwrap();
        assert_eq!(summary.tags_created, 0);
        assert_eq!(summary.tags_existing, 4);
        assert_eq!(summary.jobs_existing, 1);
        assert_eq!(store.job_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_before_loading() {
        let store = MemoryStore::new();
        let (tags, jobs) = documents();
        import(&store, &tags, &jobs, false).await.unwrap();
        let summary = import(&store, &tags, &jobs, true).await.unwrap();
        assert_eq!(summary.tags_created, 4);
        assert_eq!(summary.jobs_created, 1);
        let page = store
            .search(&JobFilter::new(), PageWindow { offset: 0, limit: 10 })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_unknown_category_in_tag_document_fails() {
        let store = MemoryStore::new();
        let tags: TagDocument =
            serde_json::from_value(json!({"tags": {"language": ["english"]}})).unwrap();
        let err = import(&store, &tags, &JobDocument::default(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCategory(_)));
    }
}
