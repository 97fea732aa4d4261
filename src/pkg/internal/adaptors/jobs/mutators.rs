use sqlx::{PgConnection, types::Json};

use crate::pkg::internal::adaptors::jobs::spec::{JOB_COLUMNS, JobEntry, NewJob};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &NewJob) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            INSERT INTO jobs AS j (job_id, job_position, job_link, company_name, company_profile,
                                   job_location, job_posting_date, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&job.job_id)
        .bind(&job.job_position)
        .bind(&job.job_link)
        .bind(&job.company_name)
        .bind(&job.company_profile)
        .bind(&job.job_location)
        .bind(job.job_posting_date)
        .bind(Json(&job.tags))
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs").execute(&mut *self.pool).await?;
        Ok(result.rows_affected())
    }
}
