use sqlx::PgConnection;

use crate::pkg::internal::adaptors::job_tags::spec::JobTagEntry;
use crate::prelude::Result;

pub struct JobTagMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobTagMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobTagMutator { pool }
    }

    pub async fn create(&mut self, job_pk: i32, tag_pk: i32) -> Result<JobTagEntry> {
        let row = sqlx::query_as::<_, JobTagEntry>(
            r#"
            INSERT INTO job_tags (job_id, tag_id)
            VALUES ($1, $2)
            RETURNING id, job_id, tag_id, created_at
            "#,
        )
        .bind(job_pk)
        .bind(tag_pk)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM job_tags")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
