use chrono::NaiveDate;

use crate::pkg::internal::adaptors::jobs::spec::{NewJob, TagSnapshot};
use crate::pkg::internal::adaptors::tags::spec::TagCategory;
use crate::pkg::internal::catalog;
use crate::pkg::internal::search::filter::SearchParams;
use crate::pkg::internal::search::service::{create_job, get_job, search_jobs};
use crate::pkg::internal::store::{JobStore, MemoryStore};
use crate::prelude::AppError;

fn job(job_id: &str, position: &str, location: &str, posted: u32, tags: &[(&str, &str)]) -> NewJob {
    let mut snapshot = TagSnapshot::new();
    for (category, name) in tags {
        snapshot
            .entry(category.to_string())
            .or_default()
            .push(name.to_string());
    }
    NewJob {
        job_id: job_id.into(),
        job_position: position.into(),
        job_link: format!("https://example.com/jobs/{}", job_id.to_lowercase()),
        company_name: format!("{} Inc", job_id),
        company_profile: None,
        job_location: Some(location.into()),
        job_posting_date: NaiveDate::from_ymd_opt(2025, 5, posted).unwrap(),
        tags: snapshot,
    }
}

/// The three-job board used by the acceptance scenarios.
async fn board() -> MemoryStore {
    let store = MemoryStore::new();
    let catalog = [
        ("python", TagCategory::Technology),
        ("django", TagCategory::Technology),
        ("backend", TagCategory::Skill),
        ("react", TagCategory::Technology),
        ("javascript", TagCategory::Technology),
        ("frontend", TagCategory::Skill),
        ("docker", TagCategory::Technology),
        ("kubernetes", TagCategory::Technology),
        ("devops", TagCategory::Skill),
    ];
    for (name, category) in catalog {
        store.create_tag(name, category, None).await.unwrap();
    }
    let jobs = [
        job(
            "JOB001",
            "Senior Python Developer",
            "San Francisco, CA",
            20,
            &[("technology", "python"), ("technology", "django"), ("skill", "backend")],
        ),
        job(
            "JOB002",
            "React Developer",
            "New York, NY",
            19,
            &[("technology", "react"), ("technology", "javascript"), ("skill", "frontend")],
        ),
        job(
            "JOB003",
            "DevOps Engineer",
            "Remote",
            18,
            &[("technology", "docker"), ("technology", "kubernetes"), ("skill", "devops")],
        ),
    ];
    for j in &jobs {
        create_job(&store, j).await.unwrap();
    }
    store
}

fn params() -> SearchParams {
    SearchParams::default()
}

#[tokio::test]
async fn test_query_matches_title_case_insensitively() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            query: Some("Python".into()),
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.total, 1);
    assert_eq!(res.items[0].job_position, "Senior Python Developer");
}

#[tokio::test]
async fn test_tag_names_are_ored() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            tags: vec!["python".into(), "react".into()],
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.total, 2);
    assert_eq!(res.items.len(), 2);
}

#[tokio::test]
async fn test_limit_two_gives_two_pages() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            page: 1,
            limit: 2,
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.items.len(), 2);
    assert_eq!(res.total, 3);
    assert_eq!(res.pages, 2);
    assert_eq!((res.page, res.limit), (1, 2));
}

#[tokio::test]
async fn test_empty_store_yields_empty_result() {
    let store = MemoryStore::new();
    let res = search_jobs(
        &store,
        &SearchParams {
            query: Some("anything".into()),
            tags: vec!["python".into()],
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.total, 0);
    assert!(res.items.is_empty());
    assert_eq!(res.pages, 0);
}

#[tokio::test]
async fn test_location_query_and_tag_combined() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            location: Some("San Francisco".into()),
            query: Some("Developer".into()),
            tags: vec!["python".into()],
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.total, 1);
    assert_eq!(res.items[0].job_id, "JOB001");
}

#[tokio::test]
async fn test_results_are_grouped_by_category() {
    let store = board().await;
    let res = search_jobs(&store, &params()).await.unwrap();
    let ids: Vec<&str> = res.items.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["JOB001", "JOB002", "JOB003"]);
    for item in &res.items {
        for (category, names) in &item.tags {
            let category: TagCategory = category.parse().unwrap();
            let known = catalog::tag_names(&store, category.as_str()).await.unwrap();
            assert!(names.iter().all(|n| known.contains(n)));
        }
    }
    assert_eq!(res.items[0].tags["technology"], vec!["python", "django"]);
}

// The name clause and the category clause are checked independently, so
// python (technology) satisfies one and backend (skill) the other.
#[tokio::test]
async fn test_tag_and_category_filters_match_independently() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            tags: vec!["python".into()],
            tag_categories: vec!["skill".into()],
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.total, 1);
    assert_eq!(res.items[0].job_id, "JOB001");
}

#[tokio::test]
async fn test_unknown_search_category_is_rejected() {
    let store = board().await;
    let err = search_jobs(
        &store,
        &SearchParams {
            tag_categories: vec!["language".into()],
            ..params()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCategory(_)));
}

#[tokio::test]
async fn test_date_range_is_inclusive() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            date_from: NaiveDate::from_ymd_opt(2025, 5, 18),
            date_to: NaiveDate::from_ymd_opt(2025, 5, 19),
            ..params()
        },
    )
    .await
    .unwrap();
    let ids: Vec<&str> = res.items.iter().map(|j| j.job_id.as_str()).collect();
    assert_eq!(ids, vec!["JOB002", "JOB003"]);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_but_counted() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            page: 5,
            limit: 2,
            ..params()
        },
    )
    .await
    .unwrap();
    assert!(res.items.is_empty());
    assert_eq!(res.total, 3);
    assert_eq!(res.pages, 2);
}

#[tokio::test]
async fn test_non_positive_paging_is_well_formed() {
    let store = board().await;
    let res = search_jobs(
        &store,
        &SearchParams {
            page: 0,
            limit: 2,
            ..params()
        },
    )
    .await
    .unwrap();
    assert_eq!(res.items.len(), 2);
    assert_eq!(res.page, 0);

    let res = search_jobs(
        &store,
        &SearchParams {
            page: -3,
            limit: -1,
            ..params()
        },
    )
    .await
    .unwrap();
    assert!(res.items.is_empty());
    assert_eq!(res.total, 3);
    assert_eq!(res.pages, 0);
    assert_eq!((res.page, res.limit), (-3, -1));
}

#[tokio::test]
async fn test_get_job_formats_or_reports_missing() {
    let store = board().await;
    let found = get_job(&store, "JOB002").await.unwrap();
    assert_eq!(found.job_position, "React Developer");
    assert_eq!(found.tags["skill"], vec!["frontend"]);

    let err = get_job(&store, "API999").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref id) if id == "API999"));
}

#[tokio::test]
async fn test_create_job_rejects_unknown_snapshot_category() {
    let store = MemoryStore::new();
    let bad = job("JOB009", "Tester", "Remote", 1, &[("language", "english")]);
    assert!(matches!(
        create_job(&store, &bad).await,
        Err(AppError::InvalidCategory(_))
    ));
    assert_eq!(store.job_count(), 0);
}
