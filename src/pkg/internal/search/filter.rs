//! Search criteria and the clause set they compile into.
//!
//! `JobFilter` is a plain value: an ordered list of clauses that are ANDed
//! together plus a flag recording whether any clause needs the job/tag
//! association. Stores translate the whole set in one go, the Postgres store
//! into a `WHERE` clause and the in-memory store through [`JobFilter::matches`].

use chrono::NaiveDate;
use serde::Deserialize;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;
use crate::pkg::internal::adaptors::tags::spec::{TagCategory, TagEntry};
use crate::prelude::Result;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Search request as it arrives at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tag_categories: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            query: None,
            location: None,
            tags: Vec::new(),
            tag_categories: Vec::new(),
            date_from: None,
            date_to: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Substring of title, company or location, case-insensitive.
    Text(String),
    /// Substring of location, case-insensitive.
    Location(String),
    /// Any association whose tag name is listed.
    TagNames(Vec<String>),
    /// Any association whose tag category is listed.
    TagCategories(Vec<TagCategory>),
    PostedFrom(NaiveDate),
    PostedTo(NaiveDate),
}

impl Clause {
    fn needs_tags(&self) -> bool {
        matches!(self, Clause::TagNames(_) | Clause::TagCategories(_))
    }

    fn matches(&self, job: &JobEntry, tags: &[TagEntry]) -> bool {
        match self {
            Clause::Text(text) => {
                let needle = text.to_lowercase();
                contains_ci(&job.job_position, &needle)
                    || contains_ci(&job.company_name, &needle)
                    || job
                        .job_location
                        .as_deref()
                        .is_some_and(|l| contains_ci(l, &needle))
            }
            Clause::Location(location) => {
                let needle = location.to_lowercase();
                job.job_location
                    .as_deref()
                    .is_some_and(|l| contains_ci(l, &needle))
            }
            Clause::TagNames(names) => tags.iter().any(|t| names.contains(&t.name)),
            Clause::TagCategories(categories) => {
                tags.iter().any(|t| categories.contains(&t.category))
            }
            Clause::PostedFrom(from) => job.job_posting_date >= *from,
            Clause::PostedTo(to) => job.job_posting_date <= *to,
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    clauses: Vec<Clause>,
    tag_join: bool,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile boundary parameters into a clause set. Unknown category names
    /// are rejected; empty strings and empty lists are dropped.
    pub fn from_params(params: &SearchParams) -> Result<Self> {
        let categories = params
            .tag_categories
            .iter()
            .map(|c| c.parse::<TagCategory>())
            .collect::<Result<Vec<_>>>()?;

        let mut filter = JobFilter::new();
        if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
            filter.push(Clause::Text(query.to_string()));
        }
        if let Some(location) = params.location.as_deref().filter(|l| !l.is_empty()) {
            filter.push(Clause::Location(location.to_string()));
        }
        if !params.tags.is_empty() {
            filter.push(Clause::TagNames(params.tags.clone()));
        }
        if !categories.is_empty() {
            filter.push(Clause::TagCategories(categories));
        }
        if let Some(from) = params.date_from {
            filter.push(Clause::PostedFrom(from));
        }
        if let Some(to) = params.date_to {
            filter.push(Clause::PostedTo(to));
        }
        Ok(filter)
    }

    pub fn push(&mut self, clause: Clause) -> &mut Self {
        self.tag_join |= clause.needs_tags();
        self.clauses.push(clause);
        self
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn requires_tag_join(&self) -> bool {
        self.tag_join
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause against one job and its full tag set.
    ///
    /// Tag clauses are independent of each other: a name clause and a
    /// category clause may be satisfied by two different associations.
    pub fn matches(&self, job: &JobEntry, tags: &[TagEntry]) -> bool {
        self.clauses.iter().all(|c| c.matches(job, tags))
    }
}
