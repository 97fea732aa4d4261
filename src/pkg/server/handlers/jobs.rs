use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::spec::NewJob,
            search::{
                filter::SearchParams,
                format::{JobResponse, SearchResponse},
                service,
            },
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

pub async fn search(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.to_string()))?;
    let res = service::search_jobs(state.store.as_ref(), &params).await?;
    Ok(Json(res))
}

pub async fn get(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>> {
    let job = service::get_job(state.store.as_ref(), &job_id).await?;
    Ok(Json(job))
}

pub async fn create(
    State(state): State<AppState>,
    input: std::result::Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    let Json(input) = input.map_err(|e| AppError::Validation(e.body_text()))?;
    let job = service::create_job(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}
