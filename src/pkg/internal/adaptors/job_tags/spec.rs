use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobTagEntry {
    pub id: i32,
    pub job_id: i32,
    pub tag_id: i32,
    pub created_at: DateTime<Utc>,
}

/// One association joined with its tag, keyed by the job's internal id.
#[derive(Debug, Clone, FromRow)]
pub struct JobTagRow {
    pub job_pk: i32,
    pub id: i32,
    pub name: String,
    pub category: TagCategory,
    pub description: Option<String>,
}

impl JobTagRow {
    pub fn into_tag(self) -> (i32, TagEntry) {
        (
            self.job_pk,
            TagEntry {
                id: self.id,
                name: self.name,
                category: self.category,
                description: self.description,
            },
        )
    }
}
