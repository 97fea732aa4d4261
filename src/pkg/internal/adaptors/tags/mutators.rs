use sqlx::PgConnection;

use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::prelude::Result;

pub struct TagMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> TagMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        TagMutator { pool }
    }

    pub async fn create(
        &mut self,
        name: &str,
        category: TagCategory,
        description: Option<&str>,
    ) -> Result<TagEntry> {
        let row = sqlx::query_as::<_, TagEntry>(
            r#"
            INSERT INTO tags (name, category, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, category, description
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(description)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tags").execute(&mut *self.pool).await?;
        Ok(result.rows_affected())
    }
}
