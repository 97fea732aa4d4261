use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    pkg::{
        internal::{
            adaptors::tags::spec::{NewTag, TagEntry},
            catalog,
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

pub async fn categories() -> Json<Vec<&'static str>> {
    Json(catalog::categories())
}

pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<String>>> {
    let names = catalog::tag_names(state.store.as_ref(), &category).await?;
    Ok(Json(names))
}

pub async fn create(
    State(state): State<AppState>,
    input: std::result::Result<Json<NewTag>, JsonRejection>,
) -> Result<(StatusCode, Json<TagEntry>)> {
    let Json(input) = input.map_err(|e| AppError::Validation(e.body_text()))?;
    let tag = catalog::create_tag(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}
