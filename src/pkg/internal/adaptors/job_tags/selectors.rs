use sqlx::PgConnection;

use crate::pkg::internal::adaptors::job_tags::spec::JobTagRow;
use crate::pkg::internal::adaptors::tags::spec::TagEntry;
use crate::prelude::Result;

pub struct JobTagSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobTagSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobTagSelector { pool }
    }

    /// Tags for every job in `job_pks`, in association insertion order.
    pub async fn tags_for_jobs(&mut self, job_pks: &[i32]) -> Result<Vec<(i32, TagEntry)>> {
        if job_pks.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, JobTagRow>(
            r#"
            SELECT jt.job_id AS job_pk, t.id, t.name, t.category, t.description
            FROM job_tags jt
            JOIN tags t ON t.id = jt.tag_id
            WHERE jt.job_id = ANY($1)
            ORDER BY jt.id
            "#,
        )
        .bind(job_pks)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows.into_iter().map(JobTagRow::into_tag).collect())
    }
}
