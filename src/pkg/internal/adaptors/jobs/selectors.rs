use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JOB_COLUMNS, JobEntry};
use crate::pkg::internal::search::filter::{Clause, JobFilter};
use crate::pkg::internal::search::pagination::PageWindow;
use crate::prelude::Result;

const TAG_EXISTS: &str =
    "EXISTS (SELECT 1 FROM job_tags jt JOIN tags t ON t.id = jt.tag_id WHERE jt.job_id = j.id AND ";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_job_id(&mut self, job_id: &str) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {} FROM jobs j WHERE j.job_id = $1",
            JOB_COLUMNS
        ))
        .bind(job_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn count_matching(&mut self, filter: &JobFilter) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs j");
        push_filter(&mut builder, filter);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn find_matching(
        &mut self,
        filter: &JobFilter,
        window: PageWindow,
    ) -> Result<Vec<JobEntry>> {
        let mut builder = page_query(filter, window);
        let rows = builder
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}

fn page_query(filter: &JobFilter, window: PageWindow) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs j", JOB_COLUMNS));
    push_filter(&mut builder, filter);
    builder
        .push(" ORDER BY j.job_posting_date DESC, j.id ASC LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    builder
}

/// Append the clause set as one `WHERE` clause. Tag clauses become
/// independent `EXISTS` probes, so each job appears at most once.
pub(crate) fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    for (i, clause) in filter.clauses().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        match clause {
            Clause::Text(text) => {
                let pattern = like_pattern(text);
                builder
                    .push("(j.job_position ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR j.company_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR j.job_location ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            Clause::Location(location) => {
                builder
                    .push("j.job_location ILIKE ")
                    .push_bind(like_pattern(location));
            }
            Clause::TagNames(names) => {
                builder
                    .push(TAG_EXISTS)
                    .push("t.name = ANY(")
                    .push_bind(names.clone())
                    .push("))");
            }
            Clause::TagCategories(categories) => {
                let categories: Vec<String> =
                    categories.iter().map(|c| c.as_str().to_string()).collect();
                builder
                    .push(TAG_EXISTS)
                    .push("t.category::text = ANY(")
                    .push_bind(categories)
                    .push("))");
            }
            Clause::PostedFrom(from) => {
                builder.push("j.job_posting_date >= ").push_bind(*from);
            }
            Clause::PostedTo(to) => {
                builder.push("j.job_posting_date <= ").push_bind(*to);
            }
        }
    }
}

/// `%text%` with LIKE metacharacters escaped so the match stays literal.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::adaptors::tags::spec::TagCategory;
    use chrono::NaiveDate;

    fn count_sql(filter: &JobFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs j");
        push_filter(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        assert_eq!(count_sql(&JobFilter::new()), "SELECT COUNT(*) FROM jobs j");
    }

    #[test]
    fn test_text_clause_binds_three_patterns() {
        let filter = JobFilter::new().with(Clause::Text("Python".into()));
        assert_eq!(
            count_sql(&filter),
            "SELECT COUNT(*) FROM jobs j WHERE (j.job_position ILIKE $1 \
             OR j.company_name ILIKE $2 OR j.job_location ILIKE $3)"
        );
    }

    #[test]
    fn test_clauses_are_anded_in_order() {
        let filter = JobFilter::new()
            .with(Clause::Location("San Francisco".into()))
            .with(Clause::TagNames(vec!["python".into()]))
            .with(Clause::PostedFrom(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
            .with(Clause::PostedTo(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert_eq!(
            count_sql(&filter),
            "SELECT COUNT(*) FROM jobs j WHERE j.job_location ILIKE $1 \
             AND EXISTS (SELECT 1 FROM job_tags jt JOIN tags t ON t.id = jt.tag_id \
             WHERE jt.job_id = j.id AND t.name = ANY($2)) \
             AND j.job_posting_date >= $3 AND j.job_posting_date <= $4"
        );
    }

    #[test]
    fn test_tag_name_and_category_use_separate_probes() {
        let filter = JobFilter::new()
            .with(Clause::TagNames(vec!["python".into()]))
            .with(Clause::TagCategories(vec![TagCategory::Skill]));
        let sql = count_sql(&filter);
        assert_eq!(sql.matches("EXISTS (").count(), 2);
        assert!(sql.ends_with("t.category::text = ANY($2))"));
    }

    #[test]
    fn test_page_query_orders_then_limits() {
        let window = PageWindow { offset: 20, limit: 10 };
        let builder = page_query(&JobFilter::new().with(Clause::Text("dev".into())), window);
        let sql = builder.sql();
        assert!(sql.starts_with("SELECT j.id, j.job_id,"));
        assert!(sql.ends_with(
            "ORDER BY j.job_posting_date DESC, j.id ASC LIMIT $4 OFFSET $5"
        ));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("python"), "%python%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }
}
