use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pkg::internal::adaptors::jobs::spec::JobWithTags;
use crate::pkg::internal::adaptors::tags::spec::TagEntry;

/// A job as clients see it, tags grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
    pub job_position: String,
    pub job_link: String,
    pub company_name: String,
    pub job_location: Option<String>,
    pub job_posting_date: NaiveDate,
    pub tags: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

/// Bucket tag names under their category, keeping association order.
/// Only categories that received a name appear in the map.
pub fn group_tags(tags: &[TagEntry]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tag in tags {
        grouped
            .entry(tag.category.to_string())
            .or_default()
            .push(tag.name.clone());
    }
    grouped
}

impl From<JobWithTags> for JobResponse {
    fn from(value: JobWithTags) -> Self {
        let tags = group_tags(&value.tags);
        let job = value.job;
        JobResponse {
            job_id: job.job_id,
            job_position: job.job_position,
            job_link: job.job_link,
            company_name: job.company_name,
            job_location: job.job_location,
            job_posting_date: job.job_posting_date,
            tags,
        }
    }
}
