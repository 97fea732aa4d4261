use axum::Json;
use serde_json::{Value, json};

pub async fn welcome() -> Json<Value> {
    Json(json!({"message": "Welcome to Job Board API"}))
}
