use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::pkg::internal::adaptors::tags::spec::TagEntry;

/// Category name -> tag names, captured when the job is created.
pub type TagSnapshot = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub job_id: String,
    pub job_position: String,
    pub job_link: String,
    pub company_name: String,
    pub company_profile: Option<String>,
    pub job_location: Option<String>,
    pub job_posting_date: NaiveDate,
    pub tags: Json<TagSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JobWithTags {
    pub job: JobEntry,
    pub tags: Vec<TagEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub job_id: String,
    pub job_position: String,
    pub job_link: String,
    pub company_name: String,
    pub company_profile: Option<String>,
    pub job_location: Option<String>,
    pub job_posting_date: NaiveDate,
    #[serde(default)]
    pub tags: TagSnapshot,
}

pub(crate) const JOB_COLUMNS: &str = "j.id, j.job_id, j.job_position, j.job_link, j.company_name, \
     j.company_profile, j.job_location, j.job_posting_date, j.tags, j.created_at, j.updated_at";
