use sqlx::PgConnection;

use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::prelude::Result;

pub struct TagSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> TagSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        TagSelector { pool }
    }

    pub async fn get_by_category(&mut self, category: TagCategory) -> Result<Vec<TagEntry>> {
        let rows = sqlx::query_as::<_, TagEntry>(
            "SELECT id, name, category, description FROM tags WHERE category = $1 ORDER BY id",
        )
        .bind(category)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_all(&mut self) -> Result<Vec<TagEntry>> {
        let rows = sqlx::query_as::<_, TagEntry>(
            "SELECT id, name, category, description FROM tags ORDER BY id",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
